use anyhow::{Context, Result};
use hackbright_core::Database;
use std::path::Path;

/// Create the tracker tables in the configured database.
pub fn init_database(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    let db = Database::create(db_path)
        .with_context(|| format!("Failed to create database {}", db_path.display()))?;
    let existed = db.has_schema()?;
    db.create_schema().context("Failed to create tables")?;
    db.close()?;

    if existed {
        println!("Tables already exist in {}", db_path.display());
    } else {
        println!("✓ Created students, projects, and grades tables in {}", db_path.display());
    }
    Ok(())
}
