use crate::coords::{AffineMatrix, Vec2};
use crate::error::Result;
use crate::input::{KeyEvent, PointerEvent};
use crate::shapes::{DrawFrame, Shape};
use crate::surface::DrawingSurface;

use super::hooks::{self, Hooks};
use super::{Order, RenderState, Transform, Transformable, UpdateEvent};

/// Scene node: a named, transformable shape with render state, user data and
/// listeners.
///
/// `D` is the user data type. Cloning deep-copies the shape, transform, render
/// state and data; listeners are not cloned (the copy starts with none).
#[derive(Debug)]
pub struct Sprite<D = ()> {
    pub name: String,
    pub transform: Transform,
    pub state: RenderState,
    pub data: D,
    shape: Box<dyn Shape>,
    hooks: Hooks<D>,
}

impl<D: Default> Sprite<D> {
    pub fn new(shape: impl Shape + 'static, name: impl Into<String>) -> Self {
        Self::with_data(shape, name, D::default())
    }
}

impl<D> Sprite<D> {
    pub fn with_data(shape: impl Shape + 'static, name: impl Into<String>, data: D) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            state: RenderState::default(),
            data,
            shape: Box::new(shape),
            hooks: Hooks::default(),
        }
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.transform.position = Vec2::new(x, y);
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.transform.rotation = degrees;
        self
    }

    pub fn scaled(mut self, sx: f32, sy: f32) -> Self {
        self.transform.scale = Vec2::new(sx, sy);
        self
    }

    pub fn with_state(mut self, state: RenderState) -> Self {
        self.state = state;
        self
    }

    // ── shape ─────────────────────────────────────────────────────────────

    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    pub fn shape_mut(&mut self) -> &mut dyn Shape {
        self.shape.as_mut()
    }

    pub fn set_shape(&mut self, shape: impl Shape + 'static) -> Box<dyn Shape> {
        std::mem::replace(&mut self.shape, Box::new(shape))
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.state.visible = visible;
    }

    // ── listeners ─────────────────────────────────────────────────────────

    pub fn on_update(&mut self, f: impl FnMut(&mut Sprite<D>, &UpdateEvent) -> Result<()> + 'static) -> &mut Self {
        self.hooks.update.push(Box::new(f));
        self
    }

    pub fn on_render(
        &mut self,
        f: impl FnMut(&Sprite<D>, &mut dyn DrawingSurface, Order) -> Result<()> + 'static,
    ) -> &mut Self {
        self.hooks.render.push(Box::new(f));
        self
    }

    pub fn on_pointer(&mut self, f: impl FnMut(&mut Sprite<D>, &PointerEvent) -> Result<()> + 'static) -> &mut Self {
        self.hooks.pointer.push(Box::new(f));
        self
    }

    pub fn on_key(&mut self, f: impl FnMut(&mut Sprite<D>, &KeyEvent) -> Result<()> + 'static) -> &mut Self {
        self.hooks.key.push(Box::new(f));
        self
    }

    pub fn has_pointer_listeners(&self) -> bool {
        !self.hooks.pointer.is_empty()
    }

    pub fn has_key_listeners(&self) -> bool {
        !self.hooks.key.is_empty()
    }

    /// Drops every registered listener.
    ///
    /// Called from inside a listener, it also drops the list being dispatched;
    /// the remaining listeners of that dispatch still run.
    pub fn clear_listeners(&mut self) {
        self.hooks.clear();
    }

    // ── per-frame entry points ────────────────────────────────────────────

    /// Hit test of a point already in this sprite's local space.
    ///
    /// Invisible sprites never hit.
    pub fn hit_test_local(&self, local: Vec2) -> bool {
        self.state.visible && self.shape.hit_test(local)
    }

    pub fn update(&mut self, ev: &UpdateEvent) -> Result<()> {
        self.emit(hooks::update_list, |l, s| l(s, ev))
    }

    pub fn handle_pointer(&mut self, ev: &PointerEvent) -> Result<()> {
        self.emit(hooks::pointer_list, |l, s| l(s, ev))
    }

    pub fn handle_key(&mut self, ev: &KeyEvent) -> Result<()> {
        self.emit(hooks::key_list, |l, s| l(s, ev))
    }

    /// `begin_draw → render(Pre) → draw → render(Post) → end_draw`.
    ///
    /// No-op when invisible. The shape's three phases always run as a matched
    /// triple; the first listener error is returned afterwards.
    pub fn draw(&mut self, frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) -> Result<()> {
        if !self.state.visible {
            return Ok(());
        }

        self.shape.begin_draw(frame, surface);
        let pre = self.emit_render(surface, Order::Pre);
        self.shape.draw(frame, surface);
        let post = self.emit_render(surface, Order::Post);
        self.shape.end_draw(frame, surface);

        pre.and(post)
    }

    fn emit_render(&mut self, surface: &mut dyn DrawingSurface, order: Order) -> Result<()> {
        self.emit(hooks::render_list, |l, s| l(s, &mut *surface, order))
    }

    /// Calls every listener in `pick`'s list with `self`, stopping at the first
    /// error. The list is moved out for the duration so listeners can receive
    /// `&mut self`; listeners registered meanwhile are appended afterwards.
    /// If the listeners were cleared meanwhile, the moved-out list is dropped.
    fn emit<L>(
        &mut self,
        pick: fn(&mut Hooks<D>) -> &mut Vec<L>,
        mut call: impl FnMut(&mut L, &mut Self) -> Result<()>,
    ) -> Result<()> {
        let generation = self.hooks.generation;
        let mut listeners = std::mem::take(pick(&mut self.hooks));
        let res = listeners.iter_mut().try_for_each(|l| call(l, &mut *self));
        if self.hooks.generation == generation {
            let added = std::mem::take(pick(&mut self.hooks));
            listeners.extend(added);
            *pick(&mut self.hooks) = listeners;
        }
        res
    }
}

impl<D: Clone> Clone for Sprite<D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transform: self.transform,
            state: self.state.clone(),
            data: self.data.clone(),
            shape: self.shape.clone_box(),
            hooks: Hooks::default(),
        }
    }
}

impl<D> Transformable for Sprite<D> {
    fn node_matrix(&self) -> AffineMatrix {
        self.transform.to_matrix()
    }
}
