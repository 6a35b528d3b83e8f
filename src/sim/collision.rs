//! Collision detection for axis-aligned sprites
//!
//! Sprites are boxes anchored at their top-left corner. Area abilities are
//! square sprites treated as circles inscribed in their box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, derived on demand from an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The circle inscribed in this (assumed square) box: center and radius
    pub fn inscribed_circle(&self) -> (Vec2, f32) {
        let radius = self.width / 2.0;
        (Vec2::new(self.x + radius, self.y + radius), radius)
    }
}

/// Strict overlap test; boxes that only share an edge do not intersect
pub fn rect_intersect(a: &BoundingRect, b: &BoundingRect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Circle vs box: clamp the center into the box and compare squared distance.
/// A zero-radius circle has no area and never hits.
pub fn rect_circle_intersect(rect: &BoundingRect, center: Vec2, radius: f32) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.x, rect.right()),
        center.y.clamp(rect.y, rect.bottom()),
    );
    radius > 0.0 && center.distance_squared(closest) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = BoundingRect::new(0.0, 0.0, 32.0, 48.0);
        let b = BoundingRect::new(20.0, 30.0, 24.0, 32.0);
        assert!(rect_intersect(&a, &b));
        assert!(rect_intersect(&b, &a));
    }

    #[test]
    fn test_shared_edge_is_not_collision() {
        let a = BoundingRect::new(0.0, 0.0, 10.0, 10.0);
        let right = BoundingRect::new(10.0, 0.0, 10.0, 10.0);
        let below = BoundingRect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!rect_intersect(&a, &right));
        assert!(!rect_intersect(&a, &below));
    }

    #[test]
    fn test_distant_rects_miss() {
        let player = BoundingRect::new(0.0, 0.0, 32.0, 48.0);
        let npc = BoundingRect::new(200.0, 200.0, 48.0, 48.0);
        assert!(!rect_intersect(&player, &npc));
    }

    #[test]
    fn test_circle_at_corner_with_zero_radius() {
        let rect = BoundingRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(!rect_circle_intersect(&rect, Vec2::new(10.0, 10.0), 0.0));
        assert!(!rect_circle_intersect(&rect, Vec2::new(30.0, 30.0), 0.0));
        assert!(!rect_circle_intersect(&rect, Vec2::new(9.0, 9.0), 0.0));
    }

    #[test]
    fn test_circle_reaching_nearest_corner() {
        let rect = BoundingRect::new(10.0, 10.0, 20.0, 20.0);
        // 3-4-5 triangle to the (10, 10) corner
        assert!(rect_circle_intersect(&rect, Vec2::new(7.0, 6.0), 5.0));
        assert!(rect_circle_intersect(&rect, Vec2::new(7.0, 6.0), 5.5));
        assert!(!rect_circle_intersect(&rect, Vec2::new(7.0, 6.0), 4.9));
    }

    #[test]
    fn test_circle_center_inside_rect() {
        let rect = BoundingRect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect_circle_intersect(&rect, Vec2::new(50.0, 50.0), 1.0));
    }

    #[test]
    fn test_circle_far_from_rect() {
        let rect = BoundingRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rect_circle_intersect(&rect, Vec2::new(100.0, 5.0), 50.0));
    }

    #[test]
    fn test_inscribed_circle() {
        let aoe = BoundingRect::new(100.0, 40.0, 120.0, 120.0);
        let (center, radius) = aoe.inscribed_circle();
        assert_eq!(center, Vec2::new(160.0, 100.0));
        assert_eq!(radius, 60.0);
        assert_eq!(center, aoe.center());
    }

    fn rect_strategy() -> impl Strategy<Value = BoundingRect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| BoundingRect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_rect_intersect_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(rect_intersect(&a, &b), rect_intersect(&b, &a));
        }

        #[test]
        fn prop_touching_horizontally_never_intersects(a in rect_strategy(), y in -500.0f32..500.0, w in 0.0f32..200.0, h in 0.0f32..200.0) {
            let b = BoundingRect::new(a.right(), y, w, h);
            prop_assert!(!rect_intersect(&a, &b));
        }
    }
}
