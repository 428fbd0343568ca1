//! Table layout of the tracker database.
//!
//! The tables normally exist before the tracker connects. This statement is
//! only run by `hackbright init` and by tests.

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    github TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS projects (
    title TEXT PRIMARY KEY,
    description TEXT NOT NULL,
    max_grade INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS grades (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_github TEXT NOT NULL REFERENCES students(github),
    project_title TEXT NOT NULL REFERENCES projects(title),
    grade INTEGER NOT NULL,
    UNIQUE (student_github, project_title)
);

CREATE INDEX IF NOT EXISTS idx_grades_project_title ON grades(project_title);
"#;

/// Tables the tracker reads and writes.
pub const TABLE_NAMES: &[&str] = &["students", "projects", "grades"];
