//! Bot settings loaded from `config.toml`.
//!
//! The file names the delivery channel and the daily post time. Secrets such as
//! the Discord token stay in the environment.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of `config.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Channel that receives the daily fortune
    pub target_channel_id: u64,
    /// UTC hour of the daily post (0-23)
    pub post_hour: u32,
    /// UTC minute of the daily post (0-59)
    pub post_minute: u32,
    /// Prefix for text commands
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// TOML file holding the preloaded fortunes
    #[serde(default = "default_preloaded_path")]
    pub preloaded_path: PathBuf,
    /// Destination of the `export` command
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

fn default_prefix() -> String {
    "mika ".to_string()
}

fn default_preloaded_path() -> PathBuf {
    PathBuf::from("fortunes.toml")
}

fn default_export_path() -> PathBuf {
    PathBuf::from("fortunes_export.json")
}

impl Settings {
    /// Parses settings from TOML text and validates the post time.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse settings: {e}"),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.target_channel_id == 0 {
            return Err(Error::Config {
                message: "target_channel_id must be a Discord channel id".to_string(),
            });
        }
        if self.post_hour > 23 {
            return Err(Error::Config {
                message: format!("post_hour must be 0-23, got {}", self.post_hour),
            });
        }
        if self.post_minute > 59 {
            return Err(Error::Config {
                message: format!("post_minute must be 0-59, got {}", self.post_minute),
            });
        }
        if self.prefix.trim().is_empty() {
            return Err(Error::Config {
                message: "prefix cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid, or the
/// post time is out of range.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading settings from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {path_ref:?}: {e}"),
    })?;
    Settings::from_toml(&contents)
}

/// Loads settings from `FORTUNE_CONFIG`, falling back to `./config.toml`.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("FORTUNE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_settings(path)
}
