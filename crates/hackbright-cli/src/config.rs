use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for the tracker.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (HBA_* prefix)
/// 3. Config file (~/.config/hackbright/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Path to the SQLite database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: HBA_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/hackbright/hackbright.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Where the interactive prompt keeps its line history.
    #[serde(default = "default_history_path")]
    pub history_file: PathBuf,

    /// Log output settings. Logging stays off when this section is absent.
    #[serde(default)]
    pub logging: Option<twyg::Opts>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            history_file: default_history_path(),
            logging: None,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/hackbright/config.toml
    /// Reads environment variables with HBA_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("hba");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, letting the --db CLI flag win when given.
    pub fn load_with_db_path(db_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(path) = db_path {
            config.database_path = path;
        }
        Ok(config)
    }
}

/// Get the default database path.
///
/// Returns: ~/.local/share/hackbright/hackbright.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    data_dir().join("hackbright.db")
}

fn default_history_path() -> PathBuf {
    data_dir().join("history.txt")
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hackbright")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/hackbright/config.toml
/// - macOS: ~/Library/Application Support/hackbright/config.toml
/// - Windows: %APPDATA%\hackbright\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hackbright")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Hackbright Project Tracker Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (HBA_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite database holding the students, projects, and grades
# tables. Create the tables once with `hackbright init`.
#
# Can also be set via:
# - CLI: hackbright --db /custom/path.db
# - Environment: HBA_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/hackbright.db"

# Line history for the interactive prompt
#history_file = "/path/to/history.txt"

# Uncomment to enable log output (twyg options)
#[logging]
#level = "debug"
#coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database_path.ends_with("hackbright/hackbright.db"));
        assert!(config.history_file.ends_with("hackbright/history.txt"));
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/test.db");
        let config = Config::load_with_db_path(Some(custom_path.clone()));
        assert!(config.is_ok());
        assert_eq!(config.unwrap().database_path, custom_path);
    }

    #[test]
    fn test_config_file_path() {
        assert!(config_file_path().ends_with("hackbright/config.toml"));
    }

    #[test]
    fn test_example_config_mentions_settings() {
        let example = example_config();
        assert!(example.contains("database_path"));
        assert!(example.contains("HBA_DATABASE_PATH"));
        assert!(example.contains("history_file"));
    }
}
