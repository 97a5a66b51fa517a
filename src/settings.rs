//! Game settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Arena;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("arena {width}x{height} is too small to hold the player")]
    ArenaTooSmall { width: f32, height: f32 },

    #[error("frame rate must be positive, got {0}")]
    BadFrameRate(f32),
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena width in logical units
    pub arena_width: f32,
    /// Arena height in logical units
    pub arena_height: f32,
    /// Frames (and therefore ticks) per second
    pub frame_rate: f32,
    /// RNG seed; `None` derives one from the system clock
    pub seed: Option<u64>,
    /// Frames the headless demo runs before exiting
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            frame_rate: DEFAULT_FRAME_RATE,
            seed: None,
            demo_frames: 3600,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let min = PLAYER_RADIUS * 2.0;
        if !(self.arena_width >= min && self.arena_height >= min) {
            return Err(SettingsError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !(self.frame_rate > 0.0) {
            return Err(SettingsError::BadFrameRate(self.frame_rate));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Configured seed, or one taken from the system clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.arena_width, 800.0);
        assert_eq!(settings.resolve_seed(), 42);
    }

    #[test]
    fn test_rejects_tiny_arena() {
        let err = Settings::from_json(r#"{ "arena_width": 10.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::ArenaTooSmall { .. }));
    }

    #[test]
    fn test_rejects_bad_frame_rate() {
        let err = Settings::from_json(r#"{ "frame_rate": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::BadFrameRate(_)));
    }

    #[test]
    fn test_slow_frame_rate_accepted() {
        let settings = Settings::from_json(r#"{ "frame_rate": 0.5 }"#).unwrap();
        assert_eq!(settings.frame_rate, 0.5);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
