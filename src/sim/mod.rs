//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Kinematic shapes with edge bouncing
//! - Pairwise collision detection and response
//! - Entities (player, enemies, platforms) and the game state machine
//! - No rendering, input devices or window handling

pub mod collision;
pub mod demo;
pub mod entity;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, contact, overlaps, resolve, touch};
pub use demo::ShapeField;
pub use entity::{Entity, EntityKind, EntityTag, PathPlan, Patrol, PlayerState};
pub use shape::{Shape, ShapeId, ShapeKind, StepConfig};
pub use state::{Camera, DeathCause, GameEvent, GamePhase, GameState, Level, PLAYER_SHAPE_ID};
pub use tick::{PairRule, TickInput, pair_rule, tick};
