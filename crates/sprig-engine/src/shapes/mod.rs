//! Drawable, hit-testable geometry attached to sprites.
//!
//! Every shape works in its sprite's local space: hit tests receive points
//! already mapped through the inverse world matrix, and geometry is traced
//! after the world matrix has been set on the surface.
//!
//! Extending:
//! - add a module here with a type implementing [`Shape`]
//! - add a [`ShapeKind`] variant
//! - override `begin_draw`/`draw`/`end_draw` only when the default
//!   save → trace → paint → restore sequence does not fit

mod bezier_path;
mod circle;
mod clip;
mod ellipse;
mod group;
mod line;
mod polygon;
mod rect;

pub use bezier_path::BezierPath;
pub use circle::Circle;
pub use clip::{ClipRegion, EndClip};
pub use ellipse::Ellipse;
pub use group::Group;
pub use line::Line;
pub use polygon::Polygon;
pub use rect::Rectangle;

use std::fmt;

use crate::coords::{AffineMatrix, Vec2};
use crate::paint::Color;
use crate::sprite::RenderState;
use crate::surface::DrawingSurface;

/// Length of the debug axes drawn when `show_axes` is set.
pub const AXIS_LENGTH: f32 = 50.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    Circle,
    Rect,
    Ellipse,
    Line,
    Polygon,
    BezierPath,
    ClipRegion,
    EndClip,
    Group,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What a shape needs to draw one sprite.
#[derive(Debug, Copy, Clone)]
pub struct DrawFrame<'a> {
    /// Local-to-world matrix of the sprite being drawn.
    pub world: AffineMatrix,
    pub state: &'a RenderState,
}

/// Geometry with a hit test and a three-phase draw.
///
/// `begin_draw`, `draw` and `end_draw` are always called as a matched triple.
pub trait Shape: fmt::Debug {
    fn kind(&self) -> ShapeKind;

    /// Containment test in local space.
    fn hit_test(&self, local: Vec2) -> bool;

    /// Emits path geometry only: no `begin_path`, no painting.
    fn trace(&mut self, surface: &mut dyn DrawingSurface);

    fn begin_draw(&mut self, frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) {
        surface.save();
        frame.state.apply(surface);
        surface.set_transform(&frame.world);
    }

    fn draw(&mut self, frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) {
        surface.begin_path();
        self.trace(surface);
        frame.state.paint(surface);
        if frame.state.show_axes {
            draw_axes(surface);
        }
    }

    fn end_draw(&mut self, _frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) {
        surface.restore();
    }

    fn clone_box(&self) -> Box<dyn Shape>;
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Strokes the local X axis in red and the Y axis in green.
pub fn draw_axes(surface: &mut dyn DrawingSurface) {
    surface.save();
    for (axis, color) in [(Vec2::X_AXIS, Color::RED), (Vec2::Y_AXIS, Color::GREEN)] {
        surface.set_stroke_color(color);
        surface.begin_path();
        surface.move_to(Vec2::zero());
        surface.line_to(axis * AXIS_LENGTH);
        surface.stroke();
    }
    surface.restore();
}

/// Stroke-only paint used by open shapes: `Custom` still paints nothing.
pub(crate) fn stroke_only(frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) {
    if frame.state.render_type != crate::sprite::RenderType::Custom {
        surface.stroke();
    }
    if frame.state.show_axes {
        draw_axes(surface);
    }
}
