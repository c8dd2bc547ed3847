//! Sprig engine crate.
//!
//! A retained 2D sprite scene graph: affine coordinate math, an ownership tree
//! of sprites, shape hit testing and pointer/key routing. Rendering goes
//! through the [`surface::DrawingSurface`] trait, implemented by the host.

pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod time;
pub mod tree;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod scene;
pub mod shapes;
pub mod sprite;
pub mod surface;

pub use error::{Result, SceneError};
