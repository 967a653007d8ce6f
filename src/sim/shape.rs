//! Kinematic shapes
//!
//! A shape is a circle or an axis-aligned rectangle that carries its own
//! position, velocity and acceleration. Rectangles are positioned by their
//! top-left corner; circles by their center.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::finite_or;

/// Opaque RGBA color tags. The simulation never reads them.
pub mod palette {
    pub const RED: u32 = 0xE62937FF;
    pub const GREEN: u32 = 0x00E430FF;
    pub const BLUE: u32 = 0x0079F1FF;
    pub const GOLD: u32 = 0xFFCB00FF;
}

/// Stable identity of a shape, used as the collision history key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Geometry of a shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle { radius: f32 },
    /// Position is the top-left corner
    Rect { width: f32, height: f32 },
}

impl ShapeKind {
    pub fn is_circle(&self) -> bool {
        matches!(self, ShapeKind::Circle { .. })
    }
}

/// Per-tick integration parameters shared by every shape
#[derive(Debug, Clone, Copy)]
pub struct StepConfig {
    /// Screen boundary used for edge bouncing (origin at top-left)
    pub screen: Vec2,
    /// Integrate acceleration into velocity before moving
    pub apply_acceleration: bool,
}

/// A kinematic 2D body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    pub color: u32,
    /// Bounce off the screen boundary
    pub edge_collision: bool,
    /// Shapes already resolved against this frame
    #[serde(skip)]
    history: BTreeSet<ShapeId>,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind, pos: Vec2, vel: Vec2, color: u32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            accel: Vec2::ZERO,
            color,
            edge_collision: true,
            history: BTreeSet::new(),
        }
    }

    pub fn circle(id: ShapeId, center: Vec2, vel: Vec2, radius: f32, color: u32) -> Self {
        Self::new(id, ShapeKind::Circle { radius }, center, vel, color)
    }

    pub fn rect(id: ShapeId, corner: Vec2, vel: Vec2, size: Vec2, color: u32) -> Self {
        Self::new(
            id,
            ShapeKind::Rect {
                width: size.x,
                height: size.y,
            },
            corner,
            vel,
            color,
        )
    }

    pub fn with_accel(mut self, accel: Vec2) -> Self {
        self.accel = accel;
        self
    }

    pub fn with_edge_collision(mut self, enabled: bool) -> Self {
        self.edge_collision = enabled;
        self
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn extent(&self) -> (Vec2, Vec2) {
        match self.kind {
            ShapeKind::Circle { radius } => (self.pos - Vec2::splat(radius), self.pos + Vec2::splat(radius)),
            ShapeKind::Rect { width, height } => (self.pos, self.pos + Vec2::new(width, height)),
        }
    }

    /// Reset per-frame state. Call once per tick before any collision test.
    pub fn on_new_frame(&mut self) {
        self.history.clear();
    }

    /// Whether `other` was already resolved against this shape this frame
    pub fn has_resolved(&self, other: ShapeId) -> bool {
        self.history.contains(&other)
    }

    pub(crate) fn mark_resolved(&mut self, other: ShapeId) {
        self.history.insert(other);
    }

    /// Replace the geometry, keeping identity and kinematic state
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
    }

    /// Advance one tick: optional acceleration, move, then edge bounce
    pub fn update(&mut self, dt: f32, step: &StepConfig) {
        if step.apply_acceleration {
            self.vel = finite_or(self.vel + self.accel * dt, self.vel);
        }
        self.pos += self.vel * dt;

        if self.edge_collision {
            self.bounce_off_edges(step.screen);
        }
    }

    /// Clamp inside `[0, screen]` and flip the velocity on every crossed axis
    pub fn bounce_off_edges(&mut self, screen: Vec2) {
        let (min, max) = self.extent();

        if max.x > screen.x {
            self.pos.x -= max.x - screen.x;
            self.vel.x = -self.vel.x;
        } else if min.x < 0.0 {
            self.pos.x -= min.x;
            self.vel.x = -self.vel.x;
        }

        if max.y > screen.y {
            self.pos.y -= max.y - screen.y;
            self.vel.y = -self.vel.y;
        } else if min.y < 0.0 {
            self.pos.y -= min.y;
            self.vel.y = -self.vel.y;
        }
    }
}
