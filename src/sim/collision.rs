//! Collision tests between round projectiles and axis-aligned boxes
//!
//! Every collision in the game is a circle (rocket or defense projectile)
//! against a rectangle (shield, target or drone hurtbox). The test clamps the
//! circle centre into the rectangle and compares squared distances.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// Check whether a circle overlaps a rectangle
///
/// Touching exactly (distance == radius) is not an overlap.
#[inline]
pub fn rect_circle_overlap(rect: &Rect, center: Vec2, radius: f32) -> bool {
    let nearest = rect.nearest_point(center);
    center.distance_squared(nearest) < radius * radius
}

/// Whether a point lies outside the playfield grown by `margin` on every side
///
/// Non-finite positions count as outside.
#[inline]
pub fn out_of_bounds(pos: Vec2, width: f32, height: f32, margin: f32) -> bool {
    !pos.is_finite()
        || pos.x < -margin || pos.x > width + margin || pos.y < -margin || pos.y > height + margin
}
