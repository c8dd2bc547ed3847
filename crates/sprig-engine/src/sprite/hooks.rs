use std::fmt;

use crate::error::Result;
use crate::input::{KeyEvent, PointerEvent};
use crate::surface::DrawingSurface;

use super::Sprite;

/// Which side of a node's children a hook fires on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Order {
    /// Before the children (update) or before the shape paints (render).
    Pre,
    /// After the children (update) or after the shape paints (render).
    Post,
}

/// Timing passed to update listeners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UpdateEvent {
    /// Milliseconds since the stage started.
    pub elapsed_msec: f64,
    /// Seconds since the previous update.
    pub interval_sec: f32,
    pub order: Order,
}

pub type UpdateListener<D> = Box<dyn FnMut(&mut Sprite<D>, &UpdateEvent) -> Result<()>>;
pub type RenderListener<D> = Box<dyn FnMut(&Sprite<D>, &mut dyn DrawingSurface, Order) -> Result<()>>;
pub type PointerListener<D> = Box<dyn FnMut(&mut Sprite<D>, &PointerEvent) -> Result<()>>;
pub type KeyListener<D> = Box<dyn FnMut(&mut Sprite<D>, &KeyEvent) -> Result<()>>;

/// Listener lists, one per category, called in registration order.
pub(crate) struct Hooks<D> {
    pub(crate) update: Vec<UpdateListener<D>>,
    pub(crate) render: Vec<RenderListener<D>>,
    pub(crate) pointer: Vec<PointerListener<D>>,
    pub(crate) key: Vec<KeyListener<D>>,
    /// Bumped by every clear, so a dispatch can tell its lists were cleared
    /// while it ran.
    pub(crate) generation: u64,
}

impl<D> Default for Hooks<D> {
    fn default() -> Self {
        Self { update: Vec::new(), render: Vec::new(), pointer: Vec::new(), key: Vec::new(), generation: 0 }
    }
}

impl<D> Hooks<D> {
    pub(crate) fn clear(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self { generation, ..Self::default() };
    }
}

impl<D> fmt::Debug for Hooks<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("update", &self.update.len())
            .field("render", &self.render.len())
            .field("pointer", &self.pointer.len())
            .field("key", &self.key.len())
            .finish()
    }
}

pub(crate) fn update_list<D>(h: &mut Hooks<D>) -> &mut Vec<UpdateListener<D>> {
    &mut h.update
}

pub(crate) fn render_list<D>(h: &mut Hooks<D>) -> &mut Vec<RenderListener<D>> {
    &mut h.render
}

pub(crate) fn pointer_list<D>(h: &mut Hooks<D>) -> &mut Vec<PointerListener<D>> {
    &mut h.pointer
}

pub(crate) fn key_list<D>(h: &mut Hooks<D>) -> &mut Vec<KeyListener<D>> {
    &mut h.key
}
