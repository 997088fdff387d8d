//! Application configuration.
//!
//! Values come from built-in defaults, then `<config_dir>/gameshop/config.toml`
//! when present, then `GAMESHOP_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "gameshop";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "GAMESHOP";

const DEFAULT_CATALOG_FILE: &str = "jogos.txt";
const DEFAULT_LEDGER_FILE: &str = "vendas.txt";

const DEFAULT_CONFIG: &str = r#"# Game shop settings.
# Relative paths are resolved against the working directory.

# Directory holding the catalog and ledger files.
data_dir = "."
catalog_file = "jogos.txt"
ledger_file = "vendas.txt"

# Where gameshop.log is written.
log_dir = "logs"
"#;

/// Resolved settings for the shop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Directory holding both data files.
    pub data_dir: PathBuf,
    /// Catalog file name inside `data_dir`.
    pub catalog_file: String,
    /// Ledger file name inside `data_dir`.
    pub ledger_file: String,
    /// Directory for the log file.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            ledger_file: DEFAULT_LEDGER_FILE.to_string(),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load from the default config file location plus the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load using `path` as the optional config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layers(path, ::config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layers(path: &Path, env: ::config::Environment) -> Result<Self> {
        let defaults = AppConfig::default();
        let settings = ::config::Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
            .set_default("catalog_file", defaults.catalog_file.as_str())?
            .set_default("ledger_file", defaults.ledger_file.as_str())?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().into_owned())?
            .add_source(::config::File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;
        settings
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// Full path of the catalog file.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    /// Full path of the ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }
}

/// Default location of `config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write a commented default config file if none exists yet.
///
/// Returns the path when a new file was written.
pub fn ensure_default_config() -> Result<Option<PathBuf>> {
    let path = config_path();
    Ok(write_default_config(&path)?.then_some(path))
}

fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(&dir.path().join("absent.toml"))?;
        assert_eq!(config.catalog_path(), PathBuf::from(".").join("jogos.txt"));
        assert_eq!(config.ledger_path(), PathBuf::from(".").join("vendas.txt"));
        Ok(())
    }

    #[test]
    fn default_file_matches_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("gameshop").join("config.toml");
        assert!(write_default_config(&path)?);
        assert!(path.exists());
        assert_eq!(AppConfig::load_from(&path)?, AppConfig::default());

        fs::write(&path, "ledger_file = \"kept.txt\"\n")?;
        assert!(!write_default_config(&path)?);
        assert_eq!(fs::read_to_string(&path)?, "ledger_file = \"kept.txt\"\n");
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/srv/shop\"\nledger_file = \"sales.txt\"\n")?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.ledger_path(), PathBuf::from("/srv/shop/sales.txt"));
        assert_eq!(config.catalog_file, "jogos.txt");
        Ok(())
    }

    #[test]
    fn environment_overrides_file_values() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "ledger_file = \"file.txt\"\ncatalog_file = \"games.txt\"\n")?;

        let vars: ::config::Map<String, String> = [
            ("GAMESHOP_LEDGER_FILE", "env.txt"),
            ("GAMESHOP_DATA_DIR", "/srv/shop"),
            ("OTHER_LEDGER_FILE", "ignored.txt"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        let env = ::config::Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let config = AppConfig::load_layers(&path, env)?;
        assert_eq!(config.ledger_path(), PathBuf::from("/srv/shop/env.txt"));
        assert_eq!(config.catalog_file, "games.txt");
        Ok(())
    }
}
