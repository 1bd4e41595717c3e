//! Axis-aligned rectangles in canvas space
//!
//! Canvas origin is the top-left corner, x grows right and y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            pos: self.pos + Vec2::splat(amount),
            size: self.size - Vec2::splat(amount * 2.0),
        }
    }

    /// Grow by `amount` on every side
    pub fn expand(&self, amount: f32) -> Self {
        self.inset(-amount)
    }

    /// Open-interval overlap test: touching edges do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        rect_intersect(self.pos, self.size, other.pos, other.size)
    }
}

/// Rectangle overlap on raw corner/size pairs
#[inline]
pub fn rect_intersect(p1: Vec2, s1: Vec2, p2: Vec2, s2: Vec2) -> bool {
    p2.x < p1.x + s1.x && p2.x + s2.x > p1.x && p2.y < p1.y + s1.y && p2.y + s2.y > p1.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_containment_intersects() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_inset_and_expand() {
        let r = Rect::new(10.0, 10.0, 50.0, 30.0);
        let inner = r.inset(5.0);
        assert_eq!(inner, Rect::new(15.0, 15.0, 40.0, 20.0));
        assert_eq!(inner.expand(5.0), r);
        assert_eq!(r.center(), Vec2::new(35.0, 25.0));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..1500.0,
            -500.0f32..1000.0,
            0.0f32..300.0,
            0.0f32..300.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn disjoint_on_x_never_intersects(a in arb_rect(), gap in 0.0f32..100.0, b in arb_rect()) {
            let shifted = Rect::from_pos_size(
                Vec2::new(a.pos.x + a.size.x + gap, b.pos.y),
                b.size,
            );
            prop_assert!(!a.intersects(&shifted));
        }
    }
}
