use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the GitHub REST API
    pub api_url: String,
    pub user_agent: String,
    /// Overall request timeout; requests block until answered when unset
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn default_path(home: &Path) -> PathBuf {
        home.join(".config")
            .join(env!("CARGO_PKG_NAME"))
            .join("config.toml")
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    #[test]
    fn test_default_path() {
        let path = Config::default_path(Path::new("/home/alice"));
        assert_eq!(
            path,
            PathBuf::from("/home/alice/.config/ghkeys/config.toml")
        );
    }

    #[test]
    fn test_open_missing_file_uses_defaults() -> Result<()> {
        let temp_dir = assert_fs::TempDir::new()?;
        let config_file = temp_dir.child("config.toml");

        let config = Config::open(config_file.path())?;
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout(), None);

        // Loading never creates the file
        config_file.assert(predicate::path::missing());
        Ok(())
    }

    #[test]
    fn test_open_partial_file() -> Result<()> {
        let temp_dir = assert_fs::TempDir::new()?;
        let config_file = temp_dir.child("config.toml");
        config_file.write_str("api_url = \"http://127.0.0.1:8080\"\ntimeout_secs = 5\n")?;

        let config = Config::open(config_file.path())?;
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert!(config.user_agent.starts_with("ghkeys/"));
        Ok(())
    }

    #[test]
    fn test_open_invalid_file() -> Result<()> {
        let temp_dir = assert_fs::TempDir::new()?;
        let config_file = temp_dir.child("config.toml");
        config_file.write_str("timeout_secs = \"soon\"\n")?;

        let err = Config::open(config_file.path()).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config file"));
        Ok(())
    }
}
