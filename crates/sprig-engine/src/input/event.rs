use crate::coords::Vec2;

use super::{Key, Modifiers, MouseButton};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerEventKind {
    Down,
    Up,
    /// Movement with no button held; only produced when enabled in
    /// [`InputConfig`](crate::config::InputConfig).
    Move,
    /// Movement while a button is held.
    Drag,
}

/// Pointer event delivered to sprite listeners.
///
/// The host fills `viewport_pos`. The dispatcher fills `canvas_pos` before hit
/// testing and rewrites `local_pos` for every sprite it delivers to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub viewport_pos: Vec2,
    pub canvas_pos: Vec2,
    /// Position in the receiving sprite's local space.
    pub local_pos: Vec2,
    /// Button that changed (`Down`/`Up`) or is held (`Drag`).
    pub button: Option<MouseButton>,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, viewport_pos: Vec2) -> Self {
        Self {
            kind,
            viewport_pos,
            canvas_pos: viewport_pos,
            local_pos: viewport_pos,
            button: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, Vec2::new(x, y)).with_button(MouseButton::Left)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, Vec2::new(x, y)).with_button(MouseButton::Left)
    }

    pub fn drag(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Drag, Vec2::new(x, y)).with_button(MouseButton::Left)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, Vec2::new(x, y))
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeyEventKind {
    Down,
    Up,
    /// Character input; follows `Down` for printable keys.
    Press,
}

/// Keyboard event delivered to sprite listeners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: Key,
    /// Character for `Press` events.
    pub ch: Option<char>,
    pub modifiers: Modifiers,
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, key: Key) -> Self {
        Self { kind, key, ch: None, modifiers: Modifiers::default(), repeat: false }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Scene-level input produced by [`InputState`](super::InputState).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SceneEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
}
