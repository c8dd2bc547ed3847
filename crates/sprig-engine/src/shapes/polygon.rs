use crate::coords::{geometry, Vec2};
use crate::surface::DrawingSurface;

use super::{Shape, ShapeKind};

/// Closed polygon through `points` in order.
///
/// Hit testing uses fan-triangle parity (see [`geometry::point_in_polygon`]);
/// fewer than three points never hit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Regular `sides`-gon inscribed in a circle of `radius`, first vertex on +X.
    pub fn regular(sides: usize, radius: f32) -> Self {
        let step = core::f32::consts::TAU / sides.max(3) as f32;
        let points = (0..sides.max(3))
            .map(|i| {
                let (s, c) = (step * i as f32).sin_cos();
                Vec2::new(c * radius, s * radius)
            })
            .collect();
        Self { points }
    }

    pub fn is_convex(&self) -> bool {
        geometry::is_convex(&self.points)
    }
}

impl Shape for Polygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn hit_test(&self, local: Vec2) -> bool {
        geometry::point_in_polygon(local, &self.points)
    }

    fn trace(&mut self, surface: &mut dyn DrawingSurface) {
        let Some((first, rest)) = self.points.split_first() else { return };
        surface.move_to(*first);
        for &p in rest {
            surface.line_to(p);
        }
        surface.close_path();
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}
