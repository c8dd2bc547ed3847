//! Scene graph: the sprite tree and the passes that walk it.

mod config;
mod dispatcher;

pub use config::{HitPolicy, SceneConfig};
pub use dispatcher::{local_matrix_in, world_matrix_in, Scene};
