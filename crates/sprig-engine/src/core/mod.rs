//! Host-facing frame driver.
//!
//! The host owns the loop and the drawing backend. Once per frame it calls
//! [`Stage::step`] with its timestamp and surface, and forwards raw input
//! through [`Stage::handle_input`]. Nothing here blocks or spawns.

mod stage;

pub use stage::Stage;
