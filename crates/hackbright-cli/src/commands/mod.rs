pub mod config;
pub mod init;
pub mod interactive;
pub mod run;

pub use init::init_database;
pub use interactive::run_interactive;
pub use run::run_once;

use anyhow::{Context, Result};
use hackbright_core::Database;
use std::path::Path;

/// Open the configured database. Failing here is fatal: the prompt never
/// starts without a connection to an existing tracker database.
pub fn connect(db_path: &Path) -> Result<Database> {
    let db = Database::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    if !db.has_schema()? {
        db.close()?;
        anyhow::bail!(
            "{} has no tracker tables; run `hackbright init` first",
            db_path.display()
        );
    }
    Ok(db)
}
