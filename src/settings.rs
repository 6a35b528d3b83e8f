//! Game settings
//!
//! Read once at startup from an optional JSON file, then the debug toggle
//! from the environment.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{PATROL_RANGE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::Viewport;
use crate::sim::GameMode;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play mode selector (1 = Invincible, 2 = Frostmourne Hungers)
    pub game_mode: u8,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Patrol RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Directory holding the sprite PNGs
    pub asset_dir: String,
    /// Draw sprite borders and ability footprints
    pub debug: bool,
    /// How far NPCs wander from home
    pub patrol_range: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_mode: 1,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            seed: None,
            asset_dir: "assets".to_string(),
            debug: false,
            patrol_range: PATROL_RANGE,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "stratholme.json";
    /// Environment toggle for debug drawing
    pub const DEBUG_ENV: &'static str = "STRATHOLME_DEBUG";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut settings = match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.apply_env(std::env::var(Self::DEBUG_ENV).ok().as_deref());
        settings
    }

    /// Apply the debug environment toggle ("1"/"true" enables, "0"/"false" disables)
    pub fn apply_env(&mut self, debug: Option<&str>) {
        match debug.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("1" | "true" | "on") => self.debug = true,
            Some("0" | "false" | "off") => self.debug = false,
            _ => {}
        }
    }

    /// Selected play mode; unknown selectors fall back to Invincible
    pub fn mode(&self) -> GameMode {
        GameMode::from_selector(self.game_mode).unwrap_or_else(|| {
            log::warn!("Unknown game mode {}, using Invincible", self.game_mode);
            GameMode::Invincible
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.screen_width, self.screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.mode(), GameMode::Invincible);
        assert_eq!(s.viewport(), Viewport::new(1000.0, 550.0));
        assert!(!s.debug);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "game_mode": 2, "seed": 42 }"#).expect("valid json");
        assert_eq!(s.mode(), GameMode::FrostmourneHungers);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let s = Settings {
            game_mode: 9,
            ..Default::default()
        };
        assert_eq!(s.mode(), GameMode::Invincible);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let s = Settings::load("/nonexistent/stratholme.json");
        assert_eq!(s.game_mode, 1);
    }

    #[test]
    fn test_debug_env_toggle() {
        let mut s = Settings::default();
        s.apply_env(Some("true"));
        assert!(s.debug);
        s.apply_env(Some("nope"));
        assert!(s.debug);
        s.apply_env(Some("0"));
        assert!(!s.debug);
        s.apply_env(None);
        assert!(!s.debug);
    }
}
