//! Gameplay entities
//!
//! An entity owns exactly one shape and layers behavior on top of its
//! kinematics: the player can jump, enemies patrol, platforms just sit there.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::{Shape, StepConfig};

/// Horizontal patrol range and speed for an enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPlan {
    /// Distance either side of the spawn point
    pub horizontal_distance: f32,
    pub speed: f32,
}

/// Enemy patrol, with turnaround points fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub plan: PathPlan,
    pub left_x: f32,
    pub right_x: f32,
}

impl Patrol {
    pub fn new(spawn: Vec2, plan: PathPlan) -> Self {
        Self {
            plan,
            left_x: spawn.x - plan.horizontal_distance,
            right_x: spawn.x + plan.horizontal_distance,
        }
    }

    /// Horizontal velocity to use at `x`, given the current one
    pub fn steer(&self, x: f32, vel_x: f32) -> f32 {
        if x < self.left_x {
            self.plan.speed.abs()
        } else if x > self.right_x {
            -self.plan.speed.abs()
        } else {
            vel_x
        }
    }
}

/// Player jump bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Game time (seconds) of the last jump
    pub last_jump_time: f64,
    /// One-shot: the next jump ignores the cooldown (set on landing)
    pub bypass_cooldown: bool,
}

impl PlayerState {
    pub fn can_jump(&self, now: f64, cooldown: f64) -> bool {
        now - self.last_jump_time > cooldown || self.bypass_cooldown
    }
}

/// Entity variant with its behavior state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player(PlayerState),
    Enemy(Patrol),
    Platform,
    WinPlatform,
}

/// Data-free tag for pair rule lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    Player,
    Enemy,
    Platform,
    WinPlatform,
}

impl EntityTag {
    /// Platforms and win platforms both hold things up
    pub fn is_support(self) -> bool {
        matches!(self, EntityTag::Platform | EntityTag::WinPlatform)
    }
}

/// A gameplay object wrapping one shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub shape: Shape,
}

impl Entity {
    /// Player affected by `gravity`, never bounced off the screen edges
    pub fn player(shape: Shape, gravity: Vec2) -> Self {
        Self {
            kind: EntityKind::Player(PlayerState::default()),
            shape: shape.with_accel(gravity).with_edge_collision(false),
        }
    }

    /// Enemy patrolling around the shape's current position
    pub fn enemy(shape: Shape, plan: PathPlan, gravity: Vec2) -> Self {
        let patrol = Patrol::new(shape.pos, plan);
        let mut shape = shape.with_accel(gravity).with_edge_collision(false);
        shape.vel = Vec2::new(plan.speed, 0.0);
        Self {
            kind: EntityKind::Enemy(patrol),
            shape,
        }
    }

    pub fn platform(shape: Shape) -> Self {
        Self {
            kind: EntityKind::Platform,
            shape: shape.with_edge_collision(false),
        }
    }

    pub fn win_platform(shape: Shape) -> Self {
        Self {
            kind: EntityKind::WinPlatform,
            shape: shape.with_edge_collision(false),
        }
    }

    pub fn tag(&self) -> EntityTag {
        match self.kind {
            EntityKind::Player(_) => EntityTag::Player,
            EntityKind::Enemy(_) => EntityTag::Enemy,
            EntityKind::Platform => EntityTag::Platform,
            EntityKind::WinPlatform => EntityTag::WinPlatform,
        }
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            EntityKind::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            EntityKind::Player(state) => Some(state),
            _ => None,
        }
    }

    /// Jump if the cooldown has elapsed or a landing armed the bypass.
    ///
    /// Only the vertical velocity is touched. Returns whether a jump happened;
    /// always false for non-player entities.
    pub fn jump(&mut self, now: f64, cooldown: f64, jump_speed: f32) -> bool {
        let EntityKind::Player(state) = &mut self.kind else {
            return false;
        };
        if !state.can_jump(now, cooldown) {
            return false;
        }

        self.shape.vel.y = jump_speed;
        state.last_jump_time = now;
        state.bypass_cooldown = false;
        true
    }

    /// Per-tick behavior followed by shape integration
    pub fn update(&mut self, dt: f32, step: &StepConfig) {
        if let EntityKind::Enemy(patrol) = &self.kind {
            self.shape.vel.x = patrol.steer(self.shape.pos.x, self.shape.vel.x);
        }
        self.shape.update(dt, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::shape::ShapeId;

    fn step() -> StepConfig {
        StepConfig {
            screen: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            apply_acceleration: false,
        }
    }

    fn player() -> Entity {
        Entity::player(
            Shape::circle(ShapeId(0), Vec2::new(0.0, 0.0), Vec2::ZERO, PLAYER_RADIUS, 0),
            GRAVITY,
        )
    }

    #[test]
    fn test_player_setup() {
        let p = player();
        assert_eq!(p.tag(), EntityTag::Player);
        assert_eq!(p.shape.accel, GRAVITY);
        assert!(!p.shape.edge_collision);
    }

    #[test]
    fn test_jump_respects_cooldown() {
        let mut p = player();
        p.shape.vel.x = 40.0;

        // Too early after game start
        assert!(!p.jump(1.0, JUMP_COOLDOWN, PLAYER_JUMP_SPEED));
        assert_eq!(p.shape.vel.y, 0.0);

        assert!(p.jump(3.5, JUMP_COOLDOWN, PLAYER_JUMP_SPEED));
        assert_eq!(p.shape.vel.y, PLAYER_JUMP_SPEED);
        assert_eq!(p.shape.vel.x, 40.0);
        assert_eq!(p.player_state().map(|s| s.last_jump_time), Some(3.5));

        // Cooldown restarts from the last jump
        assert!(!p.jump(5.0, JUMP_COOLDOWN, PLAYER_JUMP_SPEED));
    }

    #[test]
    fn test_landing_bypass_is_one_shot() {
        let mut p = player();
        if let Some(state) = p.player_state_mut() {
            state.bypass_cooldown = true;
        }
        assert!(p.jump(0.5, JUMP_COOLDOWN, PLAYER_JUMP_SPEED));
        assert_eq!(p.player_state().map(|s| s.bypass_cooldown), Some(false));
        assert!(!p.jump(0.6, JUMP_COOLDOWN, PLAYER_JUMP_SPEED));
    }

    #[test]
    fn test_non_player_cannot_jump() {
        let mut platform = Entity::platform(Shape::rect(
            ShapeId(1),
            Vec2::ZERO,
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            0,
        ));
        assert!(!platform.jump(100.0, JUMP_COOLDOWN, PLAYER_JUMP_SPEED));
        assert_eq!(platform.shape.vel, Vec2::ZERO);
    }

    #[test]
    fn test_enemy_patrols_between_turnaround_points() {
        let plan = PathPlan {
            horizontal_distance: 10.0,
            speed: 100.0,
        };
        let mut enemy = Entity::enemy(
            Shape::circle(ShapeId(1), Vec2::new(100.0, 0.0), Vec2::ZERO, ENEMY_RADIUS, 0),
            plan,
            GRAVITY,
        );
        assert_eq!(enemy.shape.vel, Vec2::new(100.0, 0.0));

        // Walk right past the right turnaround
        enemy.update(0.15, &step());
        assert!(enemy.shape.pos.x > 110.0);
        enemy.update(0.01, &step());
        assert_eq!(enemy.shape.vel.x, -100.0);

        // Inside the range the direction is kept
        enemy.shape.pos.x = 100.0;
        enemy.update(0.01, &step());
        assert_eq!(enemy.shape.vel.x, -100.0);

        // Past the left turnaround it heads right again
        enemy.shape.pos.x = 85.0;
        enemy.update(0.01, &step());
        assert_eq!(enemy.shape.vel.x, 100.0);
    }

    #[test]
    fn test_patrol_points_fixed_at_spawn() {
        let patrol = Patrol::new(
            Vec2::new(500.0, 0.0),
            PathPlan {
                horizontal_distance: 150.0,
                speed: 200.0,
            },
        );
        assert_eq!(patrol.left_x, 350.0);
        assert_eq!(patrol.right_x, 650.0);
    }
}
