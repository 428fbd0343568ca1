use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod repl;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "hackbright", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the database (default: ~/.local/share/hackbright/hackbright.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Start the interactive prompt (the default)
    ///
    /// Reads one command per line at the `HBA Database>` prompt until `quit`
    /// or Ctrl-D. Type `help` at the prompt for the list of commands:
    ///
    /// - student <github>
    /// - new_student <first_name> <last_name> <github>
    /// - project_title <title>
    /// - grade_github_title <github> <title>
    /// - assign_grade <github> <title> <grade>
    /// - add_project <title> [description...] <max_grade>
    ///
    /// A command that fails prints why and the prompt keeps going.
    Repl,
    /// Run a single prompt command and exit
    ///
    /// Example: hackbright run add_project Tic-Tac-Toe a simple game 10
    Run {
        /// The command and its arguments, as typed at the prompt
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Create the students, projects, and grades tables
    Init,
    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn setup_logging(config: &mut Config) {
    if let Some(opts) = config.logging.take() {
        if let Err(e) = twyg::setup(opts) {
            eprintln!("Failed to set up logging: {}", e);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            action: Some(ConfigAction::Path),
        }) => return commands::config::show_path(),
        Some(Commands::Config {
            action: Some(ConfigAction::Example),
        }) => return commands::config::show_example(),
        Some(Commands::Config {
            action: Some(ConfigAction::Init),
        }) => return commands::config::init_config(),
        _ => {}
    }

    let mut config = Config::load_with_db_path(cli.db)?;
    let show_config = matches!(cli.command, Some(Commands::Config { .. }));
    if show_config {
        return commands::config::show_config(&config);
    }

    setup_logging(&mut config);

    match cli.command {
        None | Some(Commands::Repl) => commands::run_interactive(&config)?,
        Some(Commands::Run { words }) => commands::run_once(&config.database_path, &words)?,
        Some(Commands::Init) => commands::init_database(&config.database_path)?,
        Some(Commands::Config { .. }) => {}
    }

    Ok(())
}
