//! Collision detection and response between shapes
//!
//! Every contact is expressed the same way: a normal pointing from the second
//! shape toward the first and a penetration depth. Response is an equal-mass
//! elastic exchange along that normal, then each shape is pushed back by half
//! the penetration.

use glam::Vec2;

use super::shape::{Shape, ShapeKind};
use crate::consts::CONTACT_EPSILON;
use crate::finite_or;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Contact point on the second shape (or between the circles)
    pub point: Vec2,
    /// Unit normal pointing from the second shape toward the first
    pub normal: Vec2,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Same contact seen from the other shape
    fn flipped(mut self) -> Self {
        if self.hit {
            self.normal = -self.normal;
            self.point += self.normal * self.penetration;
        }
        self
    }
}

/// Circle against circle
pub fn circle_circle(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let diff = a_pos - b_pos;
    let distance = diff.length();
    let reach = a_radius + b_radius;

    if distance <= CONTACT_EPSILON || distance >= reach {
        return CollisionResult::miss();
    }

    let normal = diff / distance;
    CollisionResult {
        hit: true,
        point: b_pos + normal * b_radius,
        normal,
        penetration: reach - distance,
    }
}

/// Circle against a rectangle given by its top-left corner and size
///
/// A circle whose center lies inside the rectangle has no defined normal and
/// is reported as a miss.
pub fn circle_rect(center: Vec2, radius: f32, corner: Vec2, size: Vec2) -> CollisionResult {
    let closest = center.clamp(corner, corner + size);
    let diff = center - closest;
    let distance = diff.length();

    if distance <= CONTACT_EPSILON || distance >= radius {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        point: closest,
        normal: diff / distance,
        penetration: radius - distance,
    }
}

/// Rectangle against rectangle (AABB, both positioned by top-left corner)
///
/// The normal is the axis of least overlap, signed toward the side the first
/// rectangle penetrates less.
pub fn rect_rect(a_corner: Vec2, a_size: Vec2, b_corner: Vec2, b_size: Vec2) -> CollisionResult {
    let a_max = a_corner + a_size;
    let b_max = b_corner + b_size;

    let x_overlap = a_corner.x < b_max.x && a_max.x > b_corner.x;
    let y_overlap = a_corner.y < b_max.y && a_max.y > b_corner.y;
    if !(x_overlap && y_overlap) {
        return CollisionResult::miss();
    }

    // How far `a` would have to move in each direction to clear `b`
    let push_left = a_max.x - b_corner.x;
    let push_right = b_max.x - a_corner.x;
    let push_up = a_max.y - b_corner.y;
    let push_down = b_max.y - a_corner.y;

    let min_x = push_left.min(push_right);
    let min_y = push_up.min(push_down);

    let (normal, penetration) = if min_x < min_y {
        if push_left < push_right {
            (Vec2::NEG_X, min_x)
        } else {
            (Vec2::X, min_x)
        }
    } else if push_up < push_down {
        (Vec2::NEG_Y, min_y)
    } else {
        (Vec2::Y, min_y)
    };

    // Midpoint of the overlapping region
    let point = (a_corner.max(b_corner) + a_max.min(b_max)) * 0.5;

    CollisionResult {
        hit: true,
        point,
        normal,
        penetration,
    }
}

/// Geometric contact between two shapes, normal pointing from `b` to `a`
pub fn contact(a: &Shape, b: &Shape) -> CollisionResult {
    match (a.kind, b.kind) {
        (ShapeKind::Circle { radius: ra }, ShapeKind::Circle { radius: rb }) => {
            circle_circle(a.pos, ra, b.pos, rb)
        }
        (ShapeKind::Circle { radius }, ShapeKind::Rect { width, height }) => {
            circle_rect(a.pos, radius, b.pos, Vec2::new(width, height))
        }
        (ShapeKind::Rect { width, height }, ShapeKind::Circle { radius }) => {
            circle_rect(b.pos, radius, a.pos, Vec2::new(width, height)).flipped()
        }
        (
            ShapeKind::Rect {
                width: wa,
                height: ha,
            },
            ShapeKind::Rect {
                width: wb,
                height: hb,
            },
        ) => rect_rect(a.pos, Vec2::new(wa, ha), b.pos, Vec2::new(wb, hb)),
    }
}

/// Pure overlap query, no response and no history bookkeeping.
///
/// Unlike [`contact`], coincident circles and a circle centered inside a
/// rectangle count as overlapping.
pub fn overlaps(a: &Shape, b: &Shape) -> bool {
    if a.id == b.id {
        return false;
    }

    match (a.kind, b.kind) {
        (ShapeKind::Circle { radius: ra }, ShapeKind::Circle { radius: rb }) => {
            let reach = ra + rb;
            a.pos.distance_squared(b.pos) < reach * reach
        }
        (ShapeKind::Circle { radius }, ShapeKind::Rect { width, height }) => {
            circle_overlaps_rect(a.pos, radius, b.pos, Vec2::new(width, height))
        }
        (ShapeKind::Rect { width, height }, ShapeKind::Circle { radius }) => {
            circle_overlaps_rect(b.pos, radius, a.pos, Vec2::new(width, height))
        }
        (ShapeKind::Rect { .. }, ShapeKind::Rect { .. }) => contact(a, b).hit,
    }
}

#[inline]
fn circle_overlaps_rect(center: Vec2, radius: f32, corner: Vec2, size: Vec2) -> bool {
    let closest = center.clamp(corner, corner + size);
    center.distance_squared(closest) < radius * radius
}

/// Overlap check under the per-frame history guard, with no response.
///
/// Marks the pair like [`resolve`] does, so gameplay rules that only need to
/// know about contact still fire once per pair per frame.
pub fn touch(a: &mut Shape, b: &mut Shape) -> bool {
    if a.id == b.id {
        return false;
    }
    if a.has_resolved(b.id) || b.has_resolved(a.id) {
        return false;
    }
    a.mark_resolved(b.id);
    b.mark_resolved(a.id);

    overlaps(a, b)
}

/// Detect and resolve a collision between two shapes.
///
/// Each unordered pair is resolved at most once per frame: the second call,
/// in either argument order, is a no-op until both shapes see
/// [`Shape::on_new_frame`]. Returns whether the shapes were overlapping.
///
/// Circle pairs always exchange their normal velocity components
/// (`v1' = v1 - n * dot(v1 - v2, n)`). Pairs involving a rectangle only do so
/// while closing along the normal. Velocities that come out non-finite are
/// dropped; separation is applied regardless.
pub fn resolve(a: &mut Shape, b: &mut Shape) -> bool {
    if a.id == b.id {
        return false;
    }
    if a.has_resolved(b.id) || b.has_resolved(a.id) {
        return false;
    }
    a.mark_resolved(b.id);
    b.mark_resolved(a.id);

    let result = contact(a, b);
    if !result.hit {
        return false;
    }

    let normal = result.normal;
    let along_normal = (a.vel - b.vel).dot(normal);
    let both_circles = a.kind.is_circle() && b.kind.is_circle();

    if both_circles || along_normal < 0.0 {
        let impulse = normal * along_normal;
        a.vel = finite_or(a.vel - impulse, a.vel);
        b.vel = finite_or(b.vel + impulse, b.vel);
    }

    let separation = normal * (result.penetration * 0.5);
    a.pos = finite_or(a.pos + separation, a.pos);
    b.pos = finite_or(b.pos - separation, b.pos);

    true
}
