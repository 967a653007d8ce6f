//! Grid level files
//!
//! One row per line, one cell per comma:
//! - empty: nothing
//! - `#`: platform tile
//! - `W`: win platform tile
//! - `E`: enemy, centered in its tile
//! - `P`: player spawn, centered in its tile
//!
//! Tile `(col, row)` sits at `camera.offset + (col * tile_width, row * tile_height)`.

use std::path::{Path, PathBuf};

use glam::Vec2;
use thiserror::Error;

use crate::consts::ENEMY_RADIUS;
use crate::settings::Settings;
use crate::sim::state::{Camera, Level};

/// Errors while loading a grid level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown cell {cell:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, cell: String },
}

/// Parse a level from grid text
pub fn parse_level(text: &str, camera: Camera, settings: &Settings) -> Result<Level, LevelError> {
    let tile = settings.tile_size();
    let mut platforms = Vec::new();
    let mut enemies = Vec::new();
    let mut win_platform = None;
    let mut spawn = None;

    for (row, line) in text.lines().enumerate() {
        for (col, cell) in line.split(',').enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }

            let corner = camera.offset + Vec2::new(col as f32, row as f32) * tile;
            let center = corner + tile * 0.5;

            match cell {
                "#" => platforms.push(corner),
                "W" => win_platform = Some(corner),
                "E" => enemies.push(center),
                "P" => spawn = Some(center),
                _ => {
                    return Err(LevelError::UnknownCell {
                        row,
                        col,
                        cell: cell.to_string(),
                    });
                }
            }
        }
    }

    let spawn = spawn.unwrap_or_else(|| {
        log::warn!("Level has no spawn cell, using the origin");
        Vec2::ZERO
    });

    let mut level = Level::new(camera, spawn);
    for corner in &platforms {
        level.add_platform(*corner, tile);
    }
    if let Some(corner) = win_platform {
        level.add_win_platform(corner, tile);
    }
    for center in &enemies {
        level.add_enemy(*center, ENEMY_RADIUS, settings.enemy_patrol, settings.gravity);
    }

    log::info!(
        "Loaded level: {} platforms, {} enemies, win platform: {}",
        platforms.len(),
        enemies.len(),
        win_platform.is_some()
    );
    Ok(level)
}

/// Load a level from a grid file
pub fn load_level(path: impl AsRef<Path>, camera: Camera, settings: &Settings) -> Result<Level, LevelError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| {
        log::error!("Failed to open level file {}", path.display());
        LevelError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    parse_level(&text, camera, settings)
}
