//! Rendering of command results as prompt text.

use hackbright_core::Error;

use super::command::{CommandError, COMMANDS};
use super::session::Outcome;

pub const INVALID_ENTRY: &str = "Invalid Entry. Try again.";

/// Render a successful command. Returns an empty string when there is
/// nothing to print.
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Student(student) => format!(
            "Student: {} {}\nGithub account: {}",
            student.first_name, student.last_name, student.github
        ),
        Outcome::StudentCreated(student) => {
            format!("Successfully added student: {}", student.full_name())
        }
        Outcome::Project(project) => format!(
            "Project: {} - {}\nMax grade: {}",
            project.title, project.description, project.max_grade
        ),
        Outcome::ProjectCreated(project) => {
            format!("Successfully added project: {}", project.title)
        }
        Outcome::Grades {
            github,
            title,
            grades,
        } => {
            if grades.is_empty() {
                return format!("No grades for {} on {}", github, title);
            }
            grades
                .iter()
                .map(|row| {
                    // "recieved" is kept as-is; scripts match on this text.
                    format!(
                        "{} {} recieved a {} on {}",
                        row.first_name, row.last_name, row.grade, row.project_title
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        Outcome::GradeAssigned {
            github,
            title,
            grade,
        } => format!(
            "Successfully assigned grade of {} for {} to {}",
            grade, title, github
        ),
        Outcome::Help => render_help(),
        Outcome::Quit => String::new(),
    }
}

/// Render a failed command.
pub fn render_error(err: &CommandError) -> String {
    match err {
        CommandError::Unknown(_) => INVALID_ENTRY.to_string(),
        CommandError::Malformed { usage, reason } => {
            format!("{}\n{}\nUsage: {}", INVALID_ENTRY, reason, usage)
        }
        CommandError::NotFound { entity, key } => match *entity {
            "student" => format!("No student with github {}", key),
            "project" => format!("No project titled {}", key),
            _ => format!("No {} matching {}", entity, key),
        },
        CommandError::Store(Error::ConstraintViolation(detail)) => {
            format!("Could not save: {}", detail)
        }
        CommandError::Store(Error::Database(e)) => format!("Database error: {}", e),
    }
}

fn render_help() -> String {
    let width = COMMANDS.iter().map(|c| c.usage.len()).max().unwrap_or(0);
    let lines: Vec<String> = COMMANDS
        .iter()
        .map(|spec| format!("  {:width$}  {}", spec.usage, spec.about, width = width))
        .collect();
    format!("Commands:\n{}", lines.join("\n"))
}
