use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Keys that `reelshelf config get/set` understand.
pub const KEYS: [&str; 2] = ["database_path", "log_level"];

/// Configuration for reelshelf.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (REEL_* prefix)
/// 3. Config file (~/.config/reelshelf/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database holding the catalog.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: REEL_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/reelshelf/reelshelf.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Log filter used when RUST_LOG is not set (e.g. "warn", "debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
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

        let env_opts = env::Options::with_top_level("reel");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, letting the --db flag win over every other source.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }

    /// Look up a single setting by key, rendered for display.
    pub fn value_of(&self, key: &str) -> Result<String> {
        match key {
            "database_path" => Ok(self.database_path.display().to_string()),
            "log_level" => Ok(self.log_level.clone()),
            _ => anyhow::bail!(
                "Unknown config key: {}\n\nValid keys: {}",
                key,
                KEYS.join(", ")
            ),
        }
    }
}

/// Returns: ~/.local/share/reelshelf/reelshelf.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reelshelf")
        .join("reelshelf.db")
}

fn default_log_level() -> String {
    String::from("warn")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/reelshelf/config.toml
/// - macOS: ~/Library/Application Support/reelshelf/config.toml
/// - Windows: %APPDATA%\reelshelf\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reelshelf")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Reelshelf Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (REEL_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite database holding your catalog
#
# Can also be set via:
# - CLI: reelshelf --db /custom/path.db list
# - Environment: REEL_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/reelshelf.db"

# Log level used when RUST_LOG is not set: error, warn, info, debug, trace
#
# Can also be set via:
# - Environment: REEL_LOG_LEVEL=debug
log_level = "warn"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Set `key = value` in the config file at `config_path`, creating the file
/// from the example if needed. Comments and other settings are preserved.
pub fn set_value(config_path: &Path, key: &str, value: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        anyhow::bail!(
            "Unknown config key: {}\n\nValid keys: {}",
            key,
            KEYS.join(", ")
        );
    }

    ensure_config_file_at(config_path)?;

    let contents = std::fs::read_to_string(config_path).context("Failed to read config file")?;
    let mut doc = contents
        .parse::<toml_edit::DocumentMut>()
        .context("Config file is not valid TOML")?;
    doc[key] = toml_edit::value(value);

    std::fs::write(config_path, doc.to_string()).context("Failed to write config file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.database_path.as_os_str().is_empty());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/test.db");
        let config = Config::load_with_db_path(custom_path.clone()).unwrap();
        assert_eq!(config.database_path, custom_path);
        assert_eq!(config.value_of("database_path").unwrap(), "/tmp/test.db");
    }

    #[test]
    fn test_value_of_unknown_key() {
        assert!(Config::default().value_of("colour").is_err());
    }

    #[test]
    fn test_set_value_creates_and_updates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reelshelf").join("config.toml");

        set_value(&path, "log_level", "debug").unwrap();
        set_value(&path, "database_path", "/data/shelf.db").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let doc = contents.parse::<toml_edit::DocumentMut>().unwrap();
        assert_eq!(doc["log_level"].as_str(), Some("debug"));
        assert_eq!(doc["database_path"].as_str(), Some("/data/shelf.db"));
        assert!(contents.contains("# Reelshelf Configuration File"));
    }

    #[test]
    fn test_set_value_rejects_unknown_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(set_value(&path, "colour", "blue").is_err());
        assert!(!path.exists());
    }
}
