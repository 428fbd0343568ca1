//! Parsing of prompt lines into typed commands.
//!
//! Each command name maps to a parser that checks its own arity and
//! argument types, so a malformed line becomes a [`CommandError`] instead
//! of reaching the database.

use thiserror::Error;

/// The keyword that ends an interactive session.
pub const QUIT: &str = "quit";

/// A fully validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Student {
        github: String,
    },
    NewStudent {
        first_name: String,
        last_name: String,
        github: String,
    },
    ProjectTitle {
        title: String,
    },
    GradeGithubTitle {
        github: String,
        title: String,
    },
    AssignGrade {
        github: String,
        title: String,
        grade: i64,
    },
    AddProject {
        title: String,
        description: String,
        max_grade: i64,
    },
    Help,
    Quit,
}

/// Why a line could not be run. Every variant leaves the session running.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Empty line or a command name nobody registered.
    #[error("unknown command: {0:?}")]
    Unknown(String),

    /// A known command with the wrong number or kind of arguments.
    #[error("{reason} (usage: {usage})")]
    Malformed { usage: &'static str, reason: String },

    /// A lookup matched nothing.
    #[error("no {entity} matching {key}")]
    NotFound { entity: &'static str, key: String },

    #[error(transparent)]
    Store(#[from] hackbright_core::Error),
}

type Parser = fn(&CommandSpec, &[&str]) -> Result<Command, CommandError>;

/// Registration of one command name.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub about: &'static str,
    parse: Parser,
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

impl CommandSpec {
    fn malformed(&self, reason: impl Into<String>) -> CommandError {
        CommandError::Malformed {
            usage: self.usage,
            reason: reason.into(),
        }
    }

    fn expect_args(&self, args: &[&str], count: usize) -> Result<(), CommandError> {
        if args.len() == count {
            Ok(())
        } else {
            Err(self.malformed(format!(
                "{} takes {} argument{}, got {}",
                self.name,
                count,
                if count == 1 { "" } else { "s" },
                args.len()
            )))
        }
    }

    fn integer(&self, field: &str, value: &str) -> Result<i64, CommandError> {
        value
            .parse()
            .map_err(|_| self.malformed(format!("{field} must be a whole number, got '{value}'")))
    }
}

/// Every command the prompt understands, in the order `help` lists them.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "student",
        usage: "student <github>",
        about: "Show a student",
        parse: parse_student,
    },
    CommandSpec {
        name: "new_student",
        usage: "new_student <first_name> <last_name> <github>",
        about: "Add a student",
        parse: parse_new_student,
    },
    CommandSpec {
        name: "project_title",
        usage: "project_title <title>",
        about: "Show a project",
        parse: parse_project_title,
    },
    CommandSpec {
        name: "grade_github_title",
        usage: "grade_github_title <github> <title>",
        about: "Show the grades a student received on a project",
        parse: parse_grade_github_title,
    },
    CommandSpec {
        name: "assign_grade",
        usage: "assign_grade <github> <title> <grade>",
        about: "Record a student's grade on a project",
        parse: parse_assign_grade,
    },
    CommandSpec {
        name: "add_project",
        usage: "add_project <title> [description...] <max_grade>",
        about: "Add a project",
        parse: parse_add_project,
    },
    CommandSpec {
        name: "help",
        usage: "help",
        about: "List commands",
        parse: parse_help,
    },
    CommandSpec {
        name: QUIT,
        usage: QUIT,
        about: "Leave the prompt",
        parse: parse_quit,
    },
];

/// Find the registration for a command name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

impl Command {
    /// Split a line on whitespace and parse it. The first token names the
    /// command; the rest are its positional arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((name, args)) = tokens.split_first() else {
            return Err(CommandError::Unknown(String::new()));
        };

        let spec = lookup(name).ok_or_else(|| CommandError::Unknown((*name).to_string()))?;
        (spec.parse)(spec, args)
    }
}

fn parse_student(spec: &CommandSpec, args: &[&str]) -> Result<Command, CommandError> {
    spec.expect_args(args, 1)?;
    Ok(Command::Student {
        github: args[0].to_string(),
    })
}

fn parse_new_student(spec: &CommandSpec, args: &[&str]) -> Result<Command, CommandError> {
    spec.expect_args(args, 3)?;
    Ok(Command::NewStudent {
        first_name: args[0].to_string(),
        last_name: args[1].to_string(),
        github: args[2].to_string(),
    })
}

fn parse_project_title(spec: &CommandSpec, args: &[&str]) -> Result<Command, CommandError> {
    spec.expect_args(args, 1)?;
    Ok(Command::ProjectTitle {
        title: args[0].to_string(),
    })
}

fn parse_grade_github_title(spec: &CommandSpec, args: &[&str]) -> Result<Command, CommandError> {
    spec.expect_args(args, 2)?;
    Ok(Command::GradeGithubTitle {
        github: args[0].to_string(),
        title: args[1].to_string(),
    })
}

fn parse_assign_grade(spec: &CommandSpec, args: &[&str]) -> Result<Command, CommandError> {
    spec.expect_args(args, 3)?;
    Ok(Command::AssignGrade {
        github: args[0].to_string(),
        title: args[1].to_string(),
        grade: spec.integer("grade", args[2])?,
    })
}

fn parse_help(_spec: &CommandSpec, _args: &[&str]) -> Result<Command, CommandError> {
    Ok(Command::Help)
}

// Anything after the keyword is ignored.
fn parse_quit(_spec: &CommandSpec, _args: &[&str]) -> Result<Command, CommandError> {
    Ok(Command::Quit)
}

// The description is every token between the title and the max grade.
fn parse_add_project(spec: &CommandSpec, args: &[&str]) -> Result<Command, CommandError> {
    let [title, description @ .., max_grade] = args else {
        return Err(spec.malformed(format!(
            "add_project takes at least 2 arguments, got {}",
            args.len()
        )));
    };
    Ok(Command::AddProject {
        title: (*title).to_string(),
        description: description.join(" "),
        max_grade: spec.integer("max_grade", max_grade)?,
    })
}
