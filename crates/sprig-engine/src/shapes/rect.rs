use crate::coords::{geometry, Rect, Vec2};
use crate::surface::DrawingSurface;

use super::{Shape, ShapeKind};

/// Axis-aligned rectangle positioned by a pivot.
///
/// `pivot` is a fraction of the size placed on the local origin: `(0, 0)` puts
/// the top-left corner there, `(0.5, 0.5)` centers the rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub width: f32,
    pub height: f32,
    pub pivot: Vec2,
}

impl Rectangle {
    /// Top-left pivot.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, pivot: Vec2::zero() }
    }

    pub fn centered(width: f32, height: f32) -> Self {
        Self::new(width, height).with_pivot(0.5, 0.5)
    }

    pub fn with_pivot(mut self, u: f32, v: f32) -> Self {
        self.pivot = Vec2::new(u, v);
        self
    }

    /// Local-space bounds.
    pub fn bounds(&self) -> Rect {
        Rect::with_pivot(self.width, self.height, self.pivot)
    }
}

impl Shape for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rect
    }

    fn hit_test(&self, local: Vec2) -> bool {
        geometry::point_in_rect(local, self.bounds())
    }

    fn trace(&mut self, surface: &mut dyn DrawingSurface) {
        surface.rect(self.bounds());
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_pivot() {
        let r = Rectangle::new(10.0, 10.0);
        assert!(r.hit_test(Vec2::new(5.0, 5.0)));
        assert!(r.hit_test(Vec2::new(10.0, 10.0)));
        assert!(!r.hit_test(Vec2::new(11.0, 5.0)));
    }

    #[test]
    fn centered_pivot() {
        let r = Rectangle::centered(10.0, 4.0);
        assert!(r.hit_test(Vec2::new(-4.0, -1.5)));
        assert!(!r.hit_test(Vec2::new(6.0, 0.0)));
        assert_eq!(r.bounds(), Rect::new(-5.0, -2.0, 10.0, 4.0));
    }
}
