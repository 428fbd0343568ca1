use anyhow::Result;

use crate::config::Config;
use crate::repl::{self, LineEditor, Session};

/// Run the `HBA Database>` prompt until `quit`.
pub fn run_interactive(config: &Config) -> Result<()> {
    let db = super::connect(&config.database_path)?;
    let mut session = Session::new(db);
    let mut editor = LineEditor::new(config.history_file.clone())?;
    let mut stdout = std::io::stdout();

    let result = repl::run_repl(&mut session, &mut editor, &mut stdout);

    if let Err(e) = editor.save_history() {
        log::warn!("Failed to save history: {}", e);
    }
    session.close()?;
    log::info!("Session closed for {}", config.database_path.display());

    result
}
