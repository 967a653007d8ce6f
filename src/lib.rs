//! Shape Platformer - kinematic shapes, pairwise collision response and a
//! tiny platformer built on top of them
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (shapes, collisions, entities, game state)
//! - `level`: Grid file level loader
//! - `settings`: Data-driven physics and game tuning

pub mod level;
pub mod settings;
pub mod sim;

pub use level::{LevelError, load_level, parse_level};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Constant downward acceleration for players and enemies (pixels/s²)
    pub const GRAVITY: Vec2 = Vec2::new(0.0, 200.0);
    /// Vertical velocity set on jump (negative is up)
    pub const PLAYER_JUMP_SPEED: f32 = -250.0;
    /// Seconds between jumps unless a landing bypasses it
    pub const JUMP_COOLDOWN: f64 = 3.0;
    /// Horizontal speed while a movement key is held
    pub const PLAYER_MOVE_SPEED: f32 = 100.0;

    /// Player shapes (circle form and rectangle form)
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_RECT_SIZE: f32 = 30.0;

    /// Enemy defaults for grid levels
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const ENEMY_PATROL_DISTANCE: f32 = 20.0;
    pub const ENEMY_PATROL_SPEED: f32 = 150.0;

    /// Grid level tile size
    pub const TILE_WIDTH: f32 = 100.0;
    pub const TILE_HEIGHT: f32 = 40.0;

    /// Distances below this are treated as coincident centers
    pub const CONTACT_EPSILON: f32 = 0.0001;

    /// Bouncing shapes demo ranges
    pub const DEMO_SHAPES_PER_KIND: usize = 30;
    pub const DEMO_MIN_SPEED: f32 = 50.0;
    pub const DEMO_MAX_SPEED: f32 = 200.0;
    pub const DEMO_MIN_SIZE: f32 = 5.0;
    pub const DEMO_MAX_SIZE: f32 = 50.0;
}

/// True when both components are finite (no NaN or infinity)
#[inline]
pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Return `candidate` if it is finite, otherwise keep `current`
#[inline]
pub fn finite_or(candidate: Vec2, current: Vec2) -> Vec2 {
    if is_finite_vec(candidate) {
        candidate
    } else {
        log::debug!("Discarding non-finite vector {:?}", candidate);
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_or_keeps_valid() {
        let v = finite_or(Vec2::new(1.0, 2.0), Vec2::ZERO);
        assert_eq!(v, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_finite_or_discards_nan() {
        let current = Vec2::new(3.0, -4.0);
        assert_eq!(finite_or(Vec2::new(f32::NAN, 0.0), current), current);
        assert_eq!(finite_or(Vec2::new(0.0, f32::INFINITY), current), current);
    }
}
