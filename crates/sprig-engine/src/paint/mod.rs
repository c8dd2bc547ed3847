//! Paint primitives handed to the drawing surface.

mod color;

pub use color::Color;
