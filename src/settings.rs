//! Physics and game tuning
//!
//! Loaded from a JSON file when present, otherwise the built-in defaults.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::entity::PathPlan;
use crate::sim::shape::StepConfig;

/// Errors while reading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Physics ===
    /// Constant acceleration given to players and enemies
    pub gravity: Vec2,
    /// Integrate acceleration into velocity every tick. When false,
    /// acceleration is stored but only input and collisions move bodies.
    pub apply_acceleration: bool,

    // === Player ===
    /// Vertical velocity on jump (negative is up)
    pub jump_speed: f32,
    /// Seconds between jumps, unless a landing bypasses it
    pub jump_cooldown: f64,
    /// Horizontal speed while a movement key is held
    pub move_speed: f32,

    // === Levels ===
    /// Patrol given to `E` cells in grid levels
    pub enemy_patrol: PathPlan,
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            gravity: GRAVITY,
            apply_acceleration: true,

            jump_speed: PLAYER_JUMP_SPEED,
            jump_cooldown: JUMP_COOLDOWN,
            move_speed: PLAYER_MOVE_SPEED,

            enemy_patrol: PathPlan {
                horizontal_distance: ENEMY_PATROL_DISTANCE,
                speed: ENEMY_PATROL_SPEED,
            },
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
        }
    }
}

impl Settings {
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width, self.tile_height)
    }

    /// Integration parameters for shapes
    pub fn step_config(&self) -> StepConfig {
        StepConfig {
            screen: self.screen(),
            apply_acceleration: self.apply_acceleration,
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }
}
