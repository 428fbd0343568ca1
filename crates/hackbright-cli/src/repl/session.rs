use hackbright_core::{Database, GradeReport, Project, Student};

use super::command::{Command, CommandError};

/// Whether the prompt keeps asking for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// The result of a command that succeeded, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Student(Student),
    StudentCreated(Student),
    Project(Project),
    ProjectCreated(Project),
    Grades {
        github: String,
        title: String,
        grades: Vec<GradeReport>,
    },
    GradeAssigned {
        github: String,
        title: String,
        grade: i64,
    },
    Help,
    Quit,
}

/// An interactive session: the open database plus the loop state.
#[derive(Debug)]
pub struct Session {
    db: Database,
    state: SessionState,
}

impl Session {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self {
            db,
            state: SessionState::Running,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Stop the session without a `quit` command (end of input).
    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// Parse and run one line.
    pub fn dispatch(&mut self, line: &str) -> Result<Outcome, CommandError> {
        let command = Command::parse(line)?;
        log::debug!("Dispatching {:?}", command);
        self.execute(command)
    }

    /// Run a parsed command against the database.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        match command {
            Command::Student { github } => self
                .db
                .find_student_by_github(&github)?
                .map(Outcome::Student)
                .ok_or(CommandError::NotFound {
                    entity: "student",
                    key: github,
                }),
            Command::NewStudent {
                first_name,
                last_name,
                github,
            } => {
                let student = Student::new(first_name, last_name, github);
                self.db.create_student(&student)?;
                Ok(Outcome::StudentCreated(student))
            }
            Command::ProjectTitle { title } => self
                .db
                .find_project_by_title(&title)?
                .map(Outcome::Project)
                .ok_or(CommandError::NotFound {
                    entity: "project",
                    key: title,
                }),
            Command::GradeGithubTitle { github, title } => {
                let grades = self.db.find_grades_by_github_and_title(&github, &title)?;
                Ok(Outcome::Grades {
                    github,
                    title,
                    grades,
                })
            }
            Command::AssignGrade {
                github,
                title,
                grade,
            } => {
                self.db.assign_grade(&github, &title, grade)?;
                Ok(Outcome::GradeAssigned {
                    github,
                    title,
                    grade,
                })
            }
            Command::AddProject {
                title,
                description,
                max_grade,
            } => {
                let project = Project::new(title, description, max_grade);
                self.db.create_project(&project)?;
                Ok(Outcome::ProjectCreated(project))
            }
            Command::Help => Ok(Outcome::Help),
            Command::Quit => {
                self.state = SessionState::Terminated;
                Ok(Outcome::Quit)
            }
        }
    }

    /// End the session and release the database connection.
    pub fn close(self) -> hackbright_core::Result<()> {
        self.db.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let db = Database::open_in_memory().unwrap();
        db.create_schema().unwrap();
        Session::new(db)
    }

    #[test]
    fn test_new_session_is_running() {
        assert_eq!(session().state(), SessionState::Running);
    }

    #[test]
    fn test_create_then_find_student() {
        let mut session = session();
        let created = session.dispatch("new_student Jane Hacker jhacks").unwrap();
        let student = Student::new("Jane", "Hacker", "jhacks");
        assert_eq!(created, Outcome::StudentCreated(student.clone()));

        assert_eq!(
            session.dispatch("student jhacks").unwrap(),
            Outcome::Student(student)
        );
    }

    #[test]
    fn test_create_then_find_project() {
        let mut session = session();
        session
            .dispatch("add_project Tic-Tac-Toe a simple game 10")
            .unwrap();

        assert_eq!(
            session.dispatch("project_title Tic-Tac-Toe").unwrap(),
            Outcome::Project(Project::new("Tic-Tac-Toe", "a simple game", 10))
        );
    }

    #[test]
    fn test_assign_then_query_grade() {
        let mut session = session();
        session.dispatch("new_student Jane Hacker jhacks").unwrap();
        session.dispatch("add_project Markov chains 50").unwrap();
        session.dispatch("assign_grade jhacks Markov 45").unwrap();

        match session.dispatch("grade_github_title jhacks Markov").unwrap() {
            Outcome::Grades { grades, .. } => {
                assert_eq!(grades.len(), 1);
                assert_eq!(grades[0].grade, 45);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_missing_lookups_are_not_found() {
        let mut session = session();
        assert!(matches!(
            session.dispatch("student nobody"),
            Err(CommandError::NotFound { entity: "student", .. })
        ));
        assert!(matches!(
            session.dispatch("project_title Nothing"),
            Err(CommandError::NotFound { entity: "project", .. })
        ));
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_empty_grade_query_is_not_an_error() {
        let mut session = session();
        match session.dispatch("grade_github_title jhacks Markov").unwrap() {
            Outcome::Grades { grades, .. } => assert!(grades.is_empty()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_constraint_violation_keeps_running() {
        let mut session = session();
        session.dispatch("new_student Jane Hacker jhacks").unwrap();

        let err = session
            .dispatch("new_student Janet Hacker jhacks")
            .unwrap_err();
        assert!(matches!(err, CommandError::Store(ref e) if e.is_constraint_violation()));
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_quit_terminates() {
        let mut session = session();
        assert_eq!(session.dispatch("quit").unwrap(), Outcome::Quit);
        assert_eq!(session.state(), SessionState::Terminated);
        session.close().unwrap();
    }

    #[test]
    fn test_unknown_command_keeps_running() {
        let mut session = session();
        assert!(matches!(
            session.dispatch("foo"),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(session.dispatch(""), Err(CommandError::Unknown(_))));
        assert_eq!(session.state(), SessionState::Running);
    }
}
