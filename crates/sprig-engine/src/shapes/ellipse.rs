use crate::coords::{geometry, Vec2};
use crate::surface::DrawingSurface;

use super::{Shape, ShapeKind};

/// Axis-aligned ellipse centered on the local origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipse {
    pub radius_x: f32,
    pub radius_y: f32,
}

impl Ellipse {
    pub fn new(radius_x: f32, radius_y: f32) -> Self {
        Self { radius_x, radius_y }
    }
}

impl Shape for Ellipse {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn hit_test(&self, local: Vec2) -> bool {
        geometry::point_in_ellipse(local, Vec2::zero(), self.radius_x, self.radius_y)
    }

    fn trace(&mut self, surface: &mut dyn DrawingSurface) {
        surface.ellipse(Vec2::zero(), self.radius_x, self.radius_y);
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }
}
