//! Input subsystem.
//!
//! Two layers:
//! - raw [`InputEvent`]s, platform-agnostic, reported by the host
//! - scene events ([`PointerEvent`], [`KeyEvent`]) routed through the scene
//!
//! [`InputState`] tracks held keys/buttons and converts the former into the
//! latter. Winit translation lives in `platform::winit` behind the `winit`
//! feature; nothing else here touches winit types.

mod event;
#[cfg(feature = "winit")]
pub mod platform;
mod state;
mod types;

pub use event::{KeyEvent, KeyEventKind, PointerEvent, PointerEventKind, SceneEvent};
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
};
