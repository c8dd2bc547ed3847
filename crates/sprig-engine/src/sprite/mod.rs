//! Sprites: transform + shape + render state + listeners.

mod hooks;
mod render_state;
mod sprite;
mod transform;

pub use hooks::{KeyListener, Order, PointerListener, RenderListener, UpdateEvent, UpdateListener};
pub use render_state::{RenderState, RenderStateScope, RenderStateStack, RenderType};
pub use sprite::Sprite;
pub use transform::Transform;

use crate::coords::AffineMatrix;

/// Anything that contributes a matrix to the parent-to-child chain.
///
/// World matrices are composed by walking ancestors and multiplying each
/// payload's node matrix, so every tree payload answers the same way and no
/// payload type is special-cased.
pub trait Transformable {
    /// Maps this node's local space into its parent's space.
    fn node_matrix(&self) -> AffineMatrix;
}

impl Transformable for Transform {
    fn node_matrix(&self) -> AffineMatrix {
        self.to_matrix()
    }
}
