//! Startup errors
//!
//! The simulation itself has no failure modes; only loading configuration
//! can fail.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StartupError {
    /// Settings file could not be read
    SettingsRead { path: PathBuf, source: std::io::Error },
    /// Settings file is not valid settings JSON
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A setting holds a value the game cannot run with
    InvalidSetting { name: &'static str, reason: String },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SettingsRead { path, source } => {
                write!(f, "cannot read settings file {}: {source}", path.display())
            }
            Self::SettingsParse { path, source } => {
                write!(f, "malformed settings file {}: {source}", path.display())
            }
            Self::InvalidSetting { name, reason } => write!(f, "invalid setting `{name}`: {reason}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SettingsRead { source, .. } => Some(source),
            Self::SettingsParse { source, .. } => Some(source),
            Self::InvalidSetting { .. } => None,
        }
    }
}
