use core::f32::consts::TAU;

use crate::coords::{geometry, Vec2};
use crate::surface::DrawingSurface;

use super::{Shape, ShapeKind};

/// Circle centered on the local origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Shape for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn hit_test(&self, local: Vec2) -> bool {
        geometry::point_in_circle(local, Vec2::zero(), self.radius)
    }

    fn trace(&mut self, surface: &mut dyn DrawingSurface) {
        surface.arc(Vec2::zero(), self.radius, 0.0, TAU);
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }
}
