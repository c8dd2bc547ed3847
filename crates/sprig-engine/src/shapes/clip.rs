use crate::coords::Vec2;
use crate::surface::DrawingSurface;

use super::{DrawFrame, Shape, ShapeKind};

/// Starts a clip: the surface state saved in `begin_draw` stays pushed after
/// this sprite finishes, so later sprites draw clipped to `area`.
///
/// Must be paired with a later [`EndClip`] sprite, which performs the restore.
/// Never hit.
#[derive(Debug, Clone)]
pub struct ClipRegion {
    pub area: Box<dyn Shape>,
}

impl ClipRegion {
    pub fn new(area: impl Shape + 'static) -> Self {
        Self { area: Box::new(area) }
    }
}

impl Shape for ClipRegion {
    fn kind(&self) -> ShapeKind {
        ShapeKind::ClipRegion
    }

    fn hit_test(&self, _local: Vec2) -> bool {
        false
    }

    fn trace(&mut self, surface: &mut dyn DrawingSurface) {
        self.area.trace(surface);
    }

    fn draw(&mut self, _frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) {
        surface.begin_path();
        self.trace(surface);
        surface.clip();
    }

    /// Leaves the state pushed by `begin_draw` in place.
    fn end_draw(&mut self, _frame: &DrawFrame<'_>, _surface: &mut dyn DrawingSurface) {}

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}

/// Releases the clip opened by the matching [`ClipRegion`].
///
/// `begin_draw` and `draw` do nothing; `end_draw` restores. Never hit.
#[derive(Debug, Copy, Clone, Default)]
pub struct EndClip;

impl Shape for EndClip {
    fn kind(&self) -> ShapeKind {
        ShapeKind::EndClip
    }

    fn hit_test(&self, _local: Vec2) -> bool {
        false
    }

    fn trace(&mut self, _surface: &mut dyn DrawingSurface) {}

    fn begin_draw(&mut self, _frame: &DrawFrame<'_>, _surface: &mut dyn DrawingSurface) {}

    fn draw(&mut self, _frame: &DrawFrame<'_>, _surface: &mut dyn DrawingSurface) {}

    fn end_draw(&mut self, _frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) {
        surface.restore();
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }
}
