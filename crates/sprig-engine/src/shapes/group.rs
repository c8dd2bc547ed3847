use crate::coords::Vec2;
use crate::surface::DrawingSurface;

use super::{DrawFrame, Shape, ShapeKind};

/// Pure container: no geometry, draws nothing, never hit.
///
/// Used for the scene root and for sprites that only carry a transform for
/// their children.
#[derive(Debug, Copy, Clone, Default)]
pub struct Group;

impl Shape for Group {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Group
    }

    fn hit_test(&self, _local: Vec2) -> bool {
        false
    }

    fn trace(&mut self, _surface: &mut dyn DrawingSurface) {}

    fn begin_draw(&mut self, _frame: &DrawFrame<'_>, _surface: &mut dyn DrawingSurface) {}

    fn draw(&mut self, _frame: &DrawFrame<'_>, _surface: &mut dyn DrawingSurface) {}

    fn end_draw(&mut self, _frame: &DrawFrame<'_>, _surface: &mut dyn DrawingSurface) {}

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }
}
