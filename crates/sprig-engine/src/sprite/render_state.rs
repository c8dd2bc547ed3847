use core::ops::{Deref, DerefMut};

use crate::error::{Result, SceneError};
use crate::paint::Color;
use crate::surface::DrawingSurface;

/// How a shape paints its traced path.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum RenderType {
    #[default]
    Fill,
    Stroke,
    FillAndStroke,
    /// The shape paints nothing; render listeners draw instead.
    Custom,
}

/// Per-sprite paint settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub visible: bool,
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f32,
    pub render_type: RenderType,
    /// Draws the local X (red) and Y (green) axes on top of the shape.
    pub show_axes: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            visible: true,
            fill: Color::WHITE,
            stroke: Color::BLACK,
            line_width: 1.0,
            render_type: RenderType::Fill,
            show_axes: false,
        }
    }
}

impl RenderState {
    /// Pushes colors and line width to the surface.
    pub fn apply(&self, surface: &mut dyn DrawingSurface) {
        surface.set_fill_color(self.fill);
        surface.set_stroke_color(self.stroke);
        surface.set_line_width(self.line_width);
    }

    /// Paints the surface's current path according to `render_type`.
    pub fn paint(&self, surface: &mut dyn DrawingSurface) {
        match self.render_type {
            RenderType::Fill => surface.fill(),
            RenderType::Stroke => surface.stroke(),
            RenderType::FillAndStroke => {
                surface.fill();
                surface.stroke();
            }
            RenderType::Custom => {}
        }
    }
}

/// Save/restore stack of [`RenderState`]s.
///
/// Never empty: [`restore`](Self::restore) refuses to drop the base entry.
#[derive(Debug, Clone)]
pub struct RenderStateStack {
    states: Vec<RenderState>,
}

impl Default for RenderStateStack {
    fn default() -> Self {
        Self::new(RenderState::default())
    }
}

impl RenderStateStack {
    pub fn new(base: RenderState) -> Self {
        Self { states: vec![base] }
    }

    #[inline]
    pub fn top(&self) -> &RenderState {
        &self.states[self.states.len() - 1]
    }

    #[inline]
    pub fn top_mut(&mut self) -> &mut RenderState {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    /// Duplicates the top.
    pub fn save(&mut self) {
        let top = self.top().clone();
        self.states.push(top);
    }

    /// Pushes `state` as the new top.
    pub fn push(&mut self, state: RenderState) {
        self.states.push(state);
    }

    pub fn restore(&mut self) -> Result<()> {
        if self.states.len() <= 1 {
            log::error!("RenderStateStack::restore: restore without matching save");
            return Err(SceneError::StackUnderflow { stack: "render state" });
        }
        self.states.pop();
        Ok(())
    }

    /// Pushes `state` and restores when the guard drops.
    pub fn scope(&mut self, state: RenderState) -> RenderStateScope<'_> {
        self.push(state);
        RenderStateScope { stack: self }
    }
}

/// Guard returned by [`RenderStateStack::scope`].
#[derive(Debug)]
pub struct RenderStateScope<'a> {
    stack: &'a mut RenderStateStack,
}

impl Deref for RenderStateScope<'_> {
    type Target = RenderStateStack;
    fn deref(&self) -> &RenderStateStack {
        self.stack
    }
}

impl DerefMut for RenderStateScope<'_> {
    fn deref_mut(&mut self) -> &mut RenderStateStack {
        self.stack
    }
}

impl Drop for RenderStateScope<'_> {
    fn drop(&mut self) {
        if self.stack.restore().is_err() {
            log::error!("RenderStateScope dropped with unbalanced stack");
        }
    }
}
