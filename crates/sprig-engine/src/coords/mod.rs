//! Coordinate math shared by the scene graph, shapes and event routing.
//!
//! Canonical canvas space:
//! - origin top-left
//! - +X right, +Y down
//! - positive rotation turns +X towards +Y (clockwise on screen)
//!
//! Matrices use the column-vector convention documented on [`AffineMatrix`].

mod affine;
pub mod bezier;
pub mod geometry;
mod matrix_stack;
mod rect;
mod vec2;
mod viewport;

pub use affine::AffineMatrix;
pub use matrix_stack::{MatrixScope, MatrixStack};
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::ViewportMapping;

/// Tolerance used for float comparisons across the engine.
pub const EPSILON: f32 = 1e-5;

/// Compares two scalars with [`EPSILON`] tolerance.
#[inline]
pub fn approx_eq(left: f32, right: f32) -> bool {
    (left - right).abs() <= EPSILON
}

/// Unit of an angle passed to or returned from the math helpers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Converts an angle expressed in this unit to radians.
    #[inline]
    pub fn to_radians(self, angle: f32) -> f32 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }

    /// Expresses an angle given in radians in this unit.
    #[inline]
    pub fn from_radians(self, radians: f32) -> f32 {
        match self {
            AngleUnit::Degrees => radians.to_degrees(),
            AngleUnit::Radians => radians,
        }
    }
}
