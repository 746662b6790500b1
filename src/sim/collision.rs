//! Collision primitives for axis-aligned geometry
//!
//! Everything in the playfield is either a circle (the ball) or an
//! axis-aligned rectangle (paddle, bricks), so one closest-point test and a
//! per-axis reflection cover every contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Clamp `v` into `[lo, hi]`
///
/// Unlike `f32::clamp` this never panics: if `lo > hi` the lower bound wins.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

/// Axis used for reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Point inside the rectangle nearest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(clamp(p.x, self.x, self.right()), clamp(p.y, self.y, self.bottom()))
    }
}

/// Result of a circle/rectangle test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectHit {
    /// Whether the circle overlaps the rectangle
    pub hit: bool,
    /// Axis of shallowest overlap (the one to reflect on)
    pub axis: Axis,
}

impl RectHit {
    pub fn miss() -> Self {
        Self {
            hit: false,
            axis: Axis::Y,
        }
    }
}

/// Check collision between a circle and a rectangle
///
/// Closest-point test: the circle centre is clamped into the rectangle and
/// the squared distance compared against r². On a hit the axis with the
/// smaller penetration is reported; ties go to Y.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> RectHit {
    let closest = rect.closest_point(center);
    if center.distance_squared(closest) > radius * radius {
        return RectHit::miss();
    }

    let overlap_x = (center.x + radius - rect.x).min(rect.right() - (center.x - radius));
    let overlap_y = (center.y + radius - rect.y).min(rect.bottom() - (center.y - radius));
    let axis = if overlap_x < overlap_y {
        Axis::X
    } else {
        Axis::Y
    };

    RectHit { hit: true, axis }
}

/// Negate the velocity component along `axis`
#[inline]
pub fn reflect(velocity: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::X => Vec2::new(-velocity.x, velocity.y),
        Axis::Y => Vec2::new(velocity.x, -velocity.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        // Inverted bounds resolve to the lower one
        assert_eq!(clamp(3.0, 8.0, 2.0), 8.0);
    }

    #[test]
    fn test_circle_rect_miss() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        let hit = circle_rect_collision(Vec2::new(50.0, 50.0), 8.0, &rect);
        assert!(!hit.hit);

        // Near the corner but outside the rounded distance
        let hit = circle_rect_collision(Vec2::new(94.0, 94.0), 8.0, &rect);
        assert!(!hit.hit);
    }

    #[test]
    fn test_circle_rect_hit_from_below() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        // Ball just under the middle of the brick
        let hit = circle_rect_collision(Vec2::new(125.0, 125.0), 8.0, &rect);
        assert!(hit.hit);
        assert_eq!(hit.axis, Axis::Y);
    }

    #[test]
    fn test_circle_rect_hit_from_side() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        // Ball touching the left face, vertically centred
        let hit = circle_rect_collision(Vec2::new(95.0, 110.0), 8.0, &rect);
        assert!(hit.hit);
        assert_eq!(hit.axis, Axis::X);
    }

    #[test]
    fn test_circle_rect_corner_tie_goes_to_y() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let hit = circle_rect_collision(Vec2::new(-3.0, -3.0), 5.0, &rect);
        assert!(hit.hit);
        assert_eq!(hit.axis, Axis::Y);
    }

    #[test]
    fn test_reflect() {
        let v = Vec2::new(100.0, -50.0);
        assert_eq!(reflect(v, Axis::X), Vec2::new(-100.0, -50.0));
        assert_eq!(reflect(v, Axis::Y), Vec2::new(100.0, 50.0));
    }
}
