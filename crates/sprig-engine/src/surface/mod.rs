//! Drawing backend boundary.
//!
//! The engine never rasterizes anything itself. Shapes describe their geometry
//! and paint through [`DrawingSurface`], an immediate-mode, canvas-like API with
//! a save/restore state stack, a current transform, a current path and a clip.
//!
//! [`RecordingSurface`] implements the trait by recording [`SurfaceCmd`]s; it is
//! what tests and headless hosts use.

mod recording;

pub use recording::{RecordingSurface, SurfaceCmd};

use crate::coords::{AffineMatrix, Rect, Vec2};
use crate::paint::Color;

/// Immediate-mode 2D drawing target.
///
/// Coordinates passed to path operations are in the space set by the last
/// [`set_transform`](Self::set_transform). Angles are radians.
pub trait DrawingSurface {
    /// Pushes the current transform, styles and clip.
    fn save(&mut self);
    /// Pops what the matching [`save`](Self::save) pushed.
    fn restore(&mut self);

    /// Replaces the current transform.
    fn set_transform(&mut self, m: &AffineMatrix);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn quadratic_to(&mut self, ctrl: Vec2, end: Vec2);
    fn bezier_to(&mut self, ctrl0: Vec2, ctrl1: Vec2, end: Vec2);
    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32);
    fn ellipse(&mut self, center: Vec2, radius_x: f32, radius_y: f32);
    fn rect(&mut self, rect: Rect);
    fn close_path(&mut self);

    /// Fills the current path with the fill color.
    fn fill(&mut self);
    /// Strokes the current path with the stroke color and line width.
    fn stroke(&mut self);
    /// Intersects the clip with the current path.
    fn clip(&mut self);
}
