//! Game settings and preferences
//!
//! Read once at startup from an optional JSON file; command-line flags are
//! applied on top by the binary. Missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::error::StartupError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play sounds (false is the same as `--nosound`)
    pub sound_enabled: bool,
    /// Ask the platform for a fullscreen window
    pub fullscreen: bool,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Stop after this many frames (headless runs and recordings)
    pub frame_limit: Option<u64>,
    /// Frames per second
    pub fps: u32,
    /// Let the autopilot play
    pub demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            fullscreen: false,
            seed: None,
            frame_limit: None,
            fps: FPS,
            demo: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON; `origin` names the source in errors
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, StartupError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|source| StartupError::SettingsParse {
                path: origin.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let json = std::fs::read_to_string(path).map_err(|source| StartupError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, StartupError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("Using default settings");
            Ok(Self::default())
        }
    }

    pub fn to_json(&self) -> String {
        // a struct of plain fields always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        if !(1..=1000).contains(&self.fps) {
            return Err(StartupError::InvalidSetting {
                name: "fps",
                reason: format!("{} is outside 1..=1000", self.fps),
            });
        }
        Ok(())
    }

    /// Frame period in whole milliseconds (16 at 60 fps)
    pub fn frame_period_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "fullscreen": true }"#, Path::new("inline"))
            .expect("valid json");
        assert!(settings.fullscreen);
        assert!(settings.sound_enabled);
        assert_eq!(settings.fps, FPS);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.frame_period_ms(), 16);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ sound_enabled: ", Path::new("bad.json"))
            .expect_err("must fail");
        assert!(matches!(err, StartupError::SettingsParse { .. }));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let err = Settings::from_json(r#"{ "fps": 0 }"#, Path::new("inline")).expect_err("fps");
        assert!(matches!(err, StartupError::InvalidSetting { name: "fps", .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(42),
            frame_limit: Some(600),
            ..Default::default()
        };
        let back = Settings::from_json(&settings.to_json(), Path::new("inline")).expect("parse");
        assert_eq!(back, settings);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Settings::load(Path::new("/nonexistent/vectoroids.json")).expect_err("no file");
        assert!(matches!(err, StartupError::SettingsRead { .. }));
        let settings =
            Settings::load_or_default(Path::new("/nonexistent/vectoroids.json")).expect("default");
        assert_eq!(settings, Settings::default());
    }
}
