use std::collections::HashSet;

use crate::config::InputConfig;
use crate::coords::Vec2;

use super::event::{KeyEvent, KeyEventKind, PointerEvent, PointerEventKind, SceneEvent};
use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
};

/// Current input state for one viewport.
///
/// Holds "is down" information and the pointer position, and converts raw
/// [`InputEvent`]s into [`SceneEvent`]s:
/// - button press/release → pointer `Down`/`Up`
/// - movement with a button held → `Drag` (carrying the most recently pressed
///   button still held); without one → `Move`, only if enabled
/// - key press → key `Down`, then `Press` for printable keys unless ctrl/meta
///   is held; key release → `Up`
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    pub focused: bool,

    /// Pointer position in viewport coordinates.
    pub pointer_pos: Option<Vec2>,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,

    /// Held buttons in press order; the last one labels `Drag` events.
    press_order: Vec<MouseButton>,

    pointer_move_events: bool,
}

impl InputState {
    pub fn new(config: &InputConfig) -> Self {
        Self { pointer_move_events: config.pointer_move_events, ..Self::default() }
    }

    /// Applies a raw event and appends the resulting scene events to `out`.
    pub fn apply_event(&mut self, ev: &InputEvent, out: &mut Vec<SceneEvent>) {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                    self.press_order.clear();
                }
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerMoved(pos) => {
                self.pointer_pos = Some(*pos);
                if let Some(&held) = self.press_order.last() {
                    out.push(SceneEvent::Pointer(
                        PointerEvent::new(PointerEventKind::Drag, *pos)
                            .with_button(held)
                            .with_modifiers(self.modifiers),
                    ));
                } else if self.pointer_move_events {
                    out.push(SceneEvent::Pointer(
                        PointerEvent::new(PointerEventKind::Move, *pos).with_modifiers(self.modifiers),
                    ));
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, pos, modifiers }) => {
                self.pointer_pos = Some(*pos);
                self.modifiers = *modifiers;

                let kind = match state {
                    MouseButtonState::Pressed => {
                        if !self.buttons_down.insert(*button) {
                            return;
                        }
                        self.press_order.push(*button);
                        PointerEventKind::Down
                    }
                    MouseButtonState::Released => {
                        if !self.buttons_down.remove(button) {
                            return;
                        }
                        self.press_order.retain(|b| b != button);
                        PointerEventKind::Up
                    }
                };
                out.push(SceneEvent::Pointer(
                    PointerEvent::new(kind, *pos).with_button(*button).with_modifiers(*modifiers),
                ));
            }

            InputEvent::Key { key, state, modifiers, repeat, .. } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        self.keys_down.insert(*key);
                        let down = KeyEvent { repeat: *repeat, ..KeyEvent::new(KeyEventKind::Down, *key) }
                            .with_modifiers(*modifiers);
                        out.push(SceneEvent::Key(down));

                        if modifiers.ctrl || modifiers.meta {
                            return;
                        }
                        if let Some(ch) = key.to_char(modifiers.shift) {
                            out.push(SceneEvent::Key(KeyEvent { kind: KeyEventKind::Press, ch: Some(ch), ..down }));
                        }
                    }
                    KeyState::Released => {
                        self.keys_down.remove(key);
                        out.push(SceneEvent::Key(
                            KeyEvent::new(KeyEventKind::Up, *key).with_modifiers(*modifiers),
                        ));
                    }
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            pos: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        })
    }

    fn key(key: Key, state: KeyState, modifiers: Modifiers) -> InputEvent {
        InputEvent::Key { key, state, modifiers, code: 0, repeat: false }
    }

    fn pointer_kinds(events: &[SceneEvent]) -> Vec<PointerEventKind> {
        events
            .iter()
            .filter_map(|e| match e {
                SceneEvent::Pointer(p) => Some(p.kind),
                SceneEvent::Key(_) => None,
            })
            .collect()
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn press_move_release_yields_down_drag_up() {
        let mut state = InputState::new(&InputConfig::default());
        let mut out = Vec::new();
        state.apply_event(&button(MouseButton::Left, MouseButtonState::Pressed, 1.0, 1.0), &mut out);
        state.apply_event(&InputEvent::PointerMoved(Vec2::new(4.0, 5.0)), &mut out);
        state.apply_event(&button(MouseButton::Left, MouseButtonState::Released, 4.0, 5.0), &mut out);

        use PointerEventKind::*;
        assert_eq!(pointer_kinds(&out), vec![Down, Drag, Up]);
        let SceneEvent::Pointer(drag) = out[1] else { panic!("expected pointer event") };
        assert_eq!(drag.button, Some(MouseButton::Left));
        assert_eq!(drag.viewport_pos, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn move_events_are_opt_in() {
        let mut out = Vec::new();
        InputState::new(&InputConfig::default()).apply_event(&InputEvent::PointerMoved(Vec2::zero()), &mut out);
        assert!(out.is_empty());

        let config = InputConfig { pointer_move_events: true };
        InputState::new(&config).apply_event(&InputEvent::PointerMoved(Vec2::zero()), &mut out);
        assert_eq!(pointer_kinds(&out), vec![PointerEventKind::Move]);
    }

    #[test]
    fn duplicate_press_is_ignored() {
        let mut state = InputState::default();
        let mut out = Vec::new();
        state.apply_event(&button(MouseButton::Right, MouseButtonState::Pressed, 0.0, 0.0), &mut out);
        state.apply_event(&button(MouseButton::Right, MouseButtonState::Pressed, 0.0, 0.0), &mut out);
        assert_eq!(out.len(), 1);
        assert!(state.button_down(MouseButton::Right));
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut state = InputState::default();
        let mut out = Vec::new();
        state.apply_event(&button(MouseButton::Left, MouseButtonState::Pressed, 0.0, 0.0), &mut out);
        state.apply_event(&InputEvent::Focused(false), &mut out);
        out.clear();
        state.apply_event(&InputEvent::PointerMoved(Vec2::new(1.0, 1.0)), &mut out);
        assert!(out.is_empty());
        assert!(!state.button_down(MouseButton::Left));
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[test]
    fn printable_key_emits_down_then_press() {
        let mut state = InputState::default();
        let mut out = Vec::new();
        let shift = Modifiers { shift: true, ..Modifiers::default() };
        state.apply_event(&key(Key::Q, KeyState::Pressed, shift), &mut out);
        state.apply_event(&key(Key::Q, KeyState::Released, shift), &mut out);

        let kinds: Vec<_> = out
            .iter()
            .filter_map(|e| match e {
                SceneEvent::Key(k) => Some((k.kind, k.ch)),
                SceneEvent::Pointer(_) => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![(KeyEventKind::Down, None), (KeyEventKind::Press, Some('Q')), (KeyEventKind::Up, None)]
        );
        assert!(!state.key_down(Key::Q));
    }

    #[test]
    fn control_keys_and_shortcuts_do_not_press() {
        let mut state = InputState::default();
        let mut out = Vec::new();
        state.apply_event(&key(Key::Enter, KeyState::Pressed, Modifiers::default()), &mut out);
        let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
        state.apply_event(&key(Key::C, KeyState::Pressed, ctrl), &mut out);
        assert_eq!(out.len(), 2);
        assert!(state.key_down(Key::C));
    }
}
