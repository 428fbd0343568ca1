use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

use crate::error::Result;
use crate::model::{GradeReport, Project, Student};

use super::tables::{CREATE_TABLES, TABLE_NAMES};

/// The single connection to the tracker database, with one method per
/// lookup or insert the tracker supports.
///
/// Every statement binds its arguments as parameters and runs in
/// autocommit mode, so an insert is committed before the method returns.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing database at the given path. A missing file is an
    /// error; it is never created here.
    ///
    /// Foreign keys are switched on so that grades can only reference
    /// existing students and projects.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        log::info!("Opened database {}", path.display());
        Self::with_connection(conn)
    }

    /// Open the database at the given path, creating the file if needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        log::info!("Opened database {} for setup", path.display());
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    /// Create the `students`, `projects`, and `grades` tables if they are
    /// missing.
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(CREATE_TABLES)?;
        log::info!("Ensured tables: {}", TABLE_NAMES.join(", "));
        Ok(())
    }

    /// Returns `true` when all tracker tables exist.
    pub fn has_schema(&self) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
        for table in TABLE_NAMES {
            let count: i64 = stmt.query_row([table], |row| row.get(0))?;
            if count == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Release the connection.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        log::info!("Closed database");
        Ok(())
    }
}

// Students
impl Database {
    /// Look up a student by GitHub account name.
    pub fn find_student_by_github(&self, github: &str) -> Result<Option<Student>> {
        let student = self
            .conn
            .query_row(
                "SELECT first_name, last_name, github
                 FROM students
                 WHERE github = ?1",
                [github],
                |row| {
                    Ok(Student {
                        first_name: row.get(0)?,
                        last_name: row.get(1)?,
                        github: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(student)
    }

    /// Insert a new student.
    pub fn create_student(&self, student: &Student) -> Result<()> {
        self.conn.execute(
            "INSERT INTO students (first_name, last_name, github)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![student.first_name, student.last_name, student.github],
        )?;
        log::debug!("Inserted student {}", student.github);
        Ok(())
    }
}

// Projects
impl Database {
    /// Look up a project by title.
    pub fn find_project_by_title(&self, title: &str) -> Result<Option<Project>> {
        let project = self
            .conn
            .query_row(
                "SELECT title, description, max_grade
                 FROM projects
                 WHERE title = ?1",
                [title],
                |row| {
                    Ok(Project {
                        title: row.get(0)?,
                        description: row.get(1)?,
                        max_grade: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(project)
    }

    /// Insert a new project.
    pub fn create_project(&self, project: &Project) -> Result<()> {
        self.conn.execute(
            "INSERT INTO projects (title, description, max_grade)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![project.title, project.description, project.max_grade],
        )?;
        log::debug!("Inserted project {}", project.title);
        Ok(())
    }
}

// Grades
impl Database {
    /// Get the grades a student received on a project, joined with the
    /// student's name.
    pub fn find_grades_by_github_and_title(
        &self,
        github: &str,
        title: &str,
    ) -> Result<Vec<GradeReport>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.first_name, s.last_name, g.grade, g.project_title
             FROM students s
             JOIN grades g ON s.github = g.student_github
             WHERE s.github = ?1
               AND g.project_title = ?2",
        )?;

        let grades = stmt
            .query_map([github, title], |row| {
                Ok(GradeReport {
                    first_name: row.get(0)?,
                    last_name: row.get(1)?,
                    grade: row.get(2)?,
                    project_title: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(grades)
    }

    /// Record the grade a student received on a project.
    pub fn assign_grade(&self, github: &str, title: &str, grade: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO grades (student_github, project_title, grade)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![github, title, grade],
        )?;
        log::debug!("Assigned grade {} on {} to {}", grade, title, github);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_schema().unwrap();
        db
    }

    #[test]
    fn test_create_schema() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.has_schema().unwrap());
        db.create_schema().unwrap();
        assert!(db.has_schema().unwrap());

        // Idempotent
        db.create_schema().unwrap();
        assert!(db.has_schema().unwrap());
    }

    #[test]
    fn test_student_round_trip() {
        let db = setup();
        let student = Student::new("Jane", "Hacker", "jhacks");

        db.create_student(&student).unwrap();

        let found = db.find_student_by_github("jhacks").unwrap();
        assert_eq!(found, Some(student));
    }

    #[test]
    fn test_find_missing_student() {
        let db = setup();
        assert_eq!(db.find_student_by_github("nobody").unwrap(), None);
    }

    #[test]
    fn test_duplicate_student_is_constraint_violation() {
        let db = setup();
        db.create_student(&Student::new("Jane", "Hacker", "jhacks"))
            .unwrap();

        let err = db
            .create_student(&Student::new("Janet", "Hacker", "jhacks"))
            .unwrap_err();
        assert!(err.is_constraint_violation(), "got {err:?}");
    }

    #[test]
    fn test_project_round_trip() {
        let db = setup();
        let project = Project::new("Blockly", "Programmatic Logic Puzzle Game", 100);

        db.create_project(&project).unwrap();

        let found = db.find_project_by_title("Blockly").unwrap();
        assert_eq!(found, Some(project));
        assert_eq!(db.find_project_by_title("blockly").unwrap(), None);
    }

    #[test]
    fn test_grade_round_trip() {
        let db = setup();
        db.create_student(&Student::new("Jane", "Hacker", "jhacks"))
            .unwrap();
        db.create_project(&Project::new("Markov", "Tweets generated from Markov chains", 50))
            .unwrap();

        db.assign_grade("jhacks", "Markov", 10).unwrap();

        let grades = db.find_grades_by_github_and_title("jhacks", "Markov").unwrap();
        assert_eq!(
            grades,
            vec![GradeReport {
                first_name: "Jane".to_string(),
                last_name: "Hacker".to_string(),
                grade: 10,
                project_title: "Markov".to_string(),
            }]
        );

        // Querying again has no side effect.
        let again = db.find_grades_by_github_and_title("jhacks", "Markov").unwrap();
        assert_eq!(again, grades);
    }

    #[test]
    fn test_grades_filtered_by_title() {
        let db = setup();
        db.create_student(&Student::new("Jane", "Hacker", "jhacks"))
            .unwrap();
        db.create_project(&Project::new("Markov", "Markov chains", 50))
            .unwrap();
        db.create_project(&Project::new("Blockly", "Logic puzzles", 100))
            .unwrap();
        db.assign_grade("jhacks", "Markov", 10).unwrap();
        db.assign_grade("jhacks", "Blockly", 2).unwrap();

        let grades = db.find_grades_by_github_and_title("jhacks", "Blockly").unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].grade, 2);

        assert!(db
            .find_grades_by_github_and_title("jhacks", "Other")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_assign_grade_requires_existing_student() {
        let db = setup();
        db.create_project(&Project::new("Markov", "Markov chains", 50))
            .unwrap();

        let err = db.assign_grade("ghost", "Markov", 10).unwrap_err();
        assert!(err.is_constraint_violation(), "got {err:?}");
    }

    #[test]
    fn test_assign_grade_twice_is_constraint_violation() {
        let db = setup();
        db.create_student(&Student::new("Jane", "Hacker", "jhacks"))
            .unwrap();
        db.create_project(&Project::new("Markov", "Markov chains", 50))
            .unwrap();
        db.assign_grade("jhacks", "Markov", 10).unwrap();

        let err = db.assign_grade("jhacks", "Markov", 20).unwrap_err();
        assert!(err.is_constraint_violation(), "got {err:?}");
    }

    #[test]
    fn test_parameters_are_bound() {
        let db = setup();
        let sneaky = Student::new("Robert'); DROP TABLE students;--", "Tables", "bobby");
        db.create_student(&sneaky).unwrap();

        assert_eq!(db.find_student_by_github("bobby").unwrap(), Some(sneaky));
        assert!(db.has_schema().unwrap());
    }

    #[test]
    fn test_close() {
        let db = setup();
        db.close().unwrap();
    }
}
