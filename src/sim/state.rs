//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, PathPlan};
use super::shape::{Shape, ShapeId, ShapeKind, palette};
use crate::consts::*;
use crate::settings::Settings;

/// Shape id reserved for the player; level ids start after it
pub const PLAYER_SHAPE_ID: ShapeId = ShapeId(0);

/// 2D camera framing, read by the host when drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World point the camera looks at
    pub target: Vec2,
    /// Screen point the target is drawn at
    pub offset: Vec2,
    pub rotation: f32,
    pub zoom: f32,
}

impl Camera {
    /// Camera that keeps its target at the screen center
    pub fn centered(screen: Vec2) -> Self {
        Self {
            target: Vec2::ZERO,
            offset: screen * 0.5,
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::centered(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }
}

/// Platforms, enemies, the win platform and the spawn point for one playthrough.
///
/// The level owns its entities; they are addressed by index and their shapes
/// carry ids unique within the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    entities: Vec<Entity>,
    spawn_point: Vec2,
    pub camera: Camera,
    next_id: u32,
}

impl Level {
    pub fn new(camera: Camera, spawn_point: Vec2) -> Self {
        Self {
            entities: Vec::new(),
            spawn_point,
            camera,
            next_id: PLAYER_SHAPE_ID.0 + 1,
        }
    }

    /// Allocate a new shape id
    pub fn next_shape_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a static platform; returns its index
    pub fn add_platform(&mut self, corner: Vec2, size: Vec2) -> usize {
        let id = self.next_shape_id();
        self.push(Entity::platform(Shape::rect(id, corner, Vec2::ZERO, size, palette::GREEN)))
    }

    /// Add the platform that wins the level on contact; returns its index
    pub fn add_win_platform(&mut self, corner: Vec2, size: Vec2) -> usize {
        let id = self.next_shape_id();
        self.push(Entity::win_platform(Shape::rect(id, corner, Vec2::ZERO, size, palette::GOLD)))
    }

    /// Add a circular enemy patrolling around `center`; returns its index
    pub fn add_enemy(&mut self, center: Vec2, radius: f32, plan: PathPlan, gravity: Vec2) -> usize {
        let id = self.next_shape_id();
        let shape = Shape::circle(id, center, Vec2::ZERO, radius, palette::BLUE);
        self.push(Entity::enemy(shape, plan, gravity))
    }

    fn push(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    /// Built-in level: two long platforms, one enemy and a win platform far right
    pub fn demo(camera: Camera, gravity: Vec2) -> Self {
        let mut level = Self::new(camera, Vec2::new(0.0, 20.0));
        level.add_platform(Vec2::new(-100.0, 200.0), Vec2::new(2000.0, 40.0));
        level.add_platform(Vec2::new(200.0, -200.0), Vec2::new(2000.0, 40.0));
        level.add_win_platform(Vec2::new(2100.0, 200.0), Vec2::new(2000.0, 40.0));
        level.add_enemy(
            Vec2::new(500.0, 0.0),
            ENEMY_RADIUS,
            PathPlan {
                horizontal_distance: 150.0,
                speed: 200.0,
            },
            gravity,
        );
        level
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level set but not started; nothing simulates
    Ready,
    /// Active gameplay
    Playing,
    /// Player died, waiting for restart
    Dead,
    /// Player reached the win platform, waiting for restart
    Win,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Enemy,
    Fell,
}

/// Gameplay outcomes produced during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    /// Player touched down on a platform after being airborne
    Landed,
    Jumped,
    ShapeSwapped,
    Died { cause: DeathCause },
    Won,
}

/// Complete game state: player, current level and phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub level: Level,
    pub player: Entity,
    pub phase: GamePhase,
    /// Seconds of simulated time
    pub time: f64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game on `level` with a circular player; call `start_game` to play
    pub fn new(level: Level, settings: Settings) -> Self {
        let shape = Shape::circle(
            PLAYER_SHAPE_ID,
            level.spawn_point(),
            Vec2::ZERO,
            PLAYER_RADIUS,
            palette::RED,
        );
        let player = Entity::player(shape, settings.gravity);

        Self {
            settings,
            level,
            player,
            phase: GamePhase::Ready,
            time: 0.0,
            events: Vec::new(),
        }
    }

    /// Replace the level and start playing it
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
        self.start_game();
    }

    /// Put camera and player at the spawn point and enter `Playing`
    pub fn start_game(&mut self) {
        let spawn = self.level.spawn_point();
        self.level.camera.target = spawn;

        self.player.shape.pos = spawn;
        self.player.shape.vel = Vec2::ZERO;

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Game started at spawn ({}, {})", spawn.x, spawn.y);
    }

    /// Swap the player's geometry, keeping position, velocity and acceleration
    pub fn set_player_shape(&mut self, kind: ShapeKind) {
        self.player.shape.set_kind(kind);
    }

    /// Circle becomes a square and back again
    pub fn swap_player_shape(&mut self) {
        let kind = match self.player.shape.kind {
            ShapeKind::Circle { .. } => ShapeKind::Rect {
                width: PLAYER_RECT_SIZE,
                height: PLAYER_RECT_SIZE,
            },
            ShapeKind::Rect { .. } => ShapeKind::Circle {
                radius: PLAYER_RADIUS,
            },
        };
        log::debug!("Player shape -> {:?}", kind);
        self.set_player_shape(kind);
        self.events.push(GameEvent::ShapeSwapped);
    }

    // Terminal transitions only leave `Playing`, so the first outcome of a tick sticks.

    pub(crate) fn win(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        log::info!("Level complete");
        self.phase = GamePhase::Win;
        self.events.push(GameEvent::Won);
    }

    pub(crate) fn kill_player(&mut self, cause: DeathCause) {
        if self.phase != GamePhase::Playing {
            return;
        }
        log::info!("Player died: {:?}", cause);
        self.phase = GamePhase::Dead;
        self.events.push(GameEvent::Died { cause });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ids_skip_player() {
        let mut level = Level::new(Camera::default(), Vec2::ZERO);
        let a = level.add_platform(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = level.add_enemy(Vec2::ZERO, 5.0, PathPlan { horizontal_distance: 1.0, speed: 1.0 }, GRAVITY);
        assert_eq!(level.entities()[a].shape.id, ShapeId(1));
        assert_eq!(level.entities()[b].shape.id, ShapeId(2));
    }

    #[test]
    fn test_new_game_is_not_playing() {
        let state = GameState::new(Level::demo(Camera::default(), GRAVITY), Settings::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.player.shape.id, PLAYER_SHAPE_ID);
    }

    #[test]
    fn test_start_game_resets_to_spawn() {
        let mut state = GameState::new(Level::demo(Camera::default(), GRAVITY), Settings::default());
        state.player.shape.pos = Vec2::new(999.0, 999.0);
        state.phase = GamePhase::Dead;

        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.shape.pos, Vec2::new(0.0, 20.0));
        assert_eq!(state.level.camera.target, Vec2::new(0.0, 20.0));
        assert_eq!(state.events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_swap_preserves_kinematics() {
        let mut state = GameState::new(Level::demo(Camera::default(), GRAVITY), Settings::default());
        state.player.shape.pos = Vec2::new(12.0, 34.0);
        state.player.shape.vel = Vec2::new(-5.0, 6.0);

        state.swap_player_shape();
        assert!(matches!(state.player.shape.kind, ShapeKind::Rect { .. }));
        assert_eq!(state.player.shape.pos, Vec2::new(12.0, 34.0));
        assert_eq!(state.player.shape.vel, Vec2::new(-5.0, 6.0));
        assert_eq!(state.player.shape.accel, GRAVITY);
        assert_eq!(state.player.shape.id, PLAYER_SHAPE_ID);

        state.swap_player_shape();
        assert_eq!(state.player.shape.kind, ShapeKind::Circle { radius: PLAYER_RADIUS });
    }

    #[test]
    fn test_first_outcome_sticks() {
        let mut state = GameState::new(Level::demo(Camera::default(), GRAVITY), Settings::default());
        state.start_game();
        state.kill_player(DeathCause::Enemy);
        state.win();
        assert_eq!(state.phase, GamePhase::Dead);
    }
}
