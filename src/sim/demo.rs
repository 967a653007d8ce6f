//! Bouncing shapes sandbox
//!
//! A box of random circles and rectangles that bounce off the screen edges
//! and off each other using the generic resolver.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::resolve;
use super::shape::{Shape, ShapeId, StepConfig, palette};
use crate::consts::*;

/// A field of free-floating shapes inside the screen
#[derive(Debug, Clone)]
pub struct ShapeField {
    pub shapes: Vec<Shape>,
    screen: Vec2,
    rng: Pcg32,
}

impl ShapeField {
    /// Spawn `per_kind` circles and `per_kind` rectangles at random
    pub fn random(seed: u64, per_kind: usize, screen: Vec2) -> Self {
        let mut field = Self {
            shapes: Vec::with_capacity(per_kind * 2),
            screen,
            rng: Pcg32::seed_from_u64(seed),
        };
        field.spawn(per_kind);
        field
    }

    /// Throw everything away and spawn a fresh set
    pub fn reset(&mut self, seed: u64) {
        let per_kind = self.shapes.len() / 2;
        self.rng = Pcg32::seed_from_u64(seed);
        self.spawn(per_kind);
    }

    fn spawn(&mut self, per_kind: usize) {
        self.shapes.clear();
        let mut next_id = 0;

        for _ in 0..per_kind {
            let pos = self.random_point();
            let vel = self.random_velocity();
            let radius = self.rng.random_range(DEMO_MIN_SIZE..=DEMO_MAX_SIZE);
            self.shapes
                .push(Shape::circle(ShapeId(next_id), pos, vel, radius, palette::RED));
            next_id += 1;
        }

        for _ in 0..per_kind {
            let pos = self.random_point();
            let vel = self.random_velocity();
            let size = Vec2::new(
                self.rng.random_range(DEMO_MIN_SIZE..=DEMO_MAX_SIZE),
                self.rng.random_range(DEMO_MIN_SIZE..=DEMO_MAX_SIZE),
            );
            self.shapes
                .push(Shape::rect(ShapeId(next_id), pos, vel, size, palette::GREEN));
            next_id += 1;
        }

        log::info!("Spawned {} shapes", self.shapes.len());
    }

    fn random_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(0.0..=self.screen.x),
            self.rng.random_range(0.0..=self.screen.y),
        )
    }

    /// Speed per axis in the demo range, either direction
    fn random_velocity(&mut self) -> Vec2 {
        let mut component = || {
            let speed = self.rng.random_range(DEMO_MIN_SPEED..=DEMO_MAX_SPEED);
            if self.rng.random_bool(0.5) { -speed } else { speed }
        };
        let x = component();
        let y = component();
        Vec2::new(x, y)
    }

    /// Advance one frame: reset histories, resolve all pairs, then move
    pub fn step(&mut self, dt: f32) {
        for shape in &mut self.shapes {
            shape.on_new_frame();
        }

        let count = self.shapes.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (head, tail) = self.shapes.split_at_mut(j);
                resolve(&mut head[i], &mut tail[0]);
            }
        }

        let step = StepConfig {
            screen: self.screen,
            apply_acceleration: true,
        };
        for shape in &mut self.shapes {
            shape.update(dt, &step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_random_field_is_deterministic() {
        let a = ShapeField::random(42, 10, screen());
        let b = ShapeField::random(42, 10, screen());
        assert_eq!(a.shapes.len(), 20);
        for (sa, sb) in a.shapes.iter().zip(&b.shapes) {
            assert_eq!(sa.pos, sb.pos);
            assert_eq!(sa.vel, sb.vel);
            assert_eq!(sa.kind, sb.kind);
        }
    }

    #[test]
    fn test_spawned_ranges() {
        let field = ShapeField::random(7, DEMO_SHAPES_PER_KIND, screen());
        let ids: std::collections::BTreeSet<_> = field.shapes.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), field.shapes.len());

        for s in &field.shapes {
            assert!(s.edge_collision);
            assert_eq!(s.accel, Vec2::ZERO);
            for v in [s.vel.x, s.vel.y] {
                assert!(v.abs() >= DEMO_MIN_SPEED && v.abs() <= DEMO_MAX_SPEED);
            }
        }
        assert!(field.shapes[..DEMO_SHAPES_PER_KIND].iter().all(|s| s.kind.is_circle()));
        assert!(field.shapes[DEMO_SHAPES_PER_KIND..].iter().all(|s| !s.kind.is_circle()));
    }

    #[test]
    fn test_shapes_stay_on_screen() {
        let mut field = ShapeField::random(1234, 15, screen());
        for _ in 0..600 {
            field.step(1.0 / 60.0);
        }
        for s in &field.shapes {
            let (min, max) = s.extent();
            assert!(min.x >= -1e-3 && min.y >= -1e-3, "{:?}", s);
            assert!(max.x <= SCREEN_WIDTH + 1e-3 && max.y <= SCREEN_HEIGHT + 1e-3, "{:?}", s);
            assert!(crate::is_finite_vec(s.vel));
        }
    }

    #[test]
    fn test_reset_respawns() {
        let mut field = ShapeField::random(1, 5, screen());
        field.step(1.0 / 60.0);
        field.reset(99);
        let fresh = ShapeField::random(99, 5, screen());
        assert_eq!(field.shapes.len(), 10);
        assert_eq!(field.shapes[0].pos, fresh.shapes[0].pos);
    }
}
