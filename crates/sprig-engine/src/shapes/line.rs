use crate::coords::{geometry, Vec2};
use crate::error::{Result, SceneError};
use crate::surface::DrawingSurface;

use super::{stroke_only, DrawFrame, Shape, ShapeKind};

/// Line segment; always stroked.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
    /// Distance from the segment that still counts as a hit.
    pub hit_radius: f32,
}

impl Line {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end, hit_radius: geometry::DEFAULT_LINE_HIT_RADIUS }
    }

    /// Horizontal segment of length `len` with the local origin at fraction `t`
    /// along it: `t = 0` starts at the origin, `t = 0.5` centers it.
    pub fn with_pivot(len: f32, t: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&t) {
            return Err(SceneError::InvalidParameterRange { name: "t", value: t, min: 0.0, max: 1.0 });
        }
        Ok(Self::new(Vec2::new(-len * t, 0.0), Vec2::new(len * (1.0 - t), 0.0)))
    }

    pub fn with_hit_radius(mut self, radius: f32) -> Self {
        self.hit_radius = radius;
        self
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

impl Shape for Line {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn hit_test(&self, local: Vec2) -> bool {
        geometry::point_on_segment(local, self.start, self.end, self.hit_radius)
    }

    fn trace(&mut self, surface: &mut dyn DrawingSurface) {
        surface.move_to(self.start);
        surface.line_to(self.end);
    }

    fn draw(&mut self, frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) {
        surface.begin_path();
        self.trace(surface);
        stroke_only(frame, surface);
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }
}
