use super::Vec2;

/// Maps host viewport coordinates onto the drawing surface's canvas space.
///
/// The host reports pointer positions relative to its viewport (window client
/// area). The canvas may sit at an offset inside it, framed by a border and
/// padding, and may be presented at a zoom factor:
///
/// ```text
/// canvas = (viewport - origin - border - padding) / scale
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportMapping {
    /// Top-left of the canvas element's border box in viewport coordinates.
    pub origin: Vec2,
    /// Left/top border widths.
    pub border: Vec2,
    /// Left/top padding.
    pub padding: Vec2,
    /// Presentation zoom. A zero or non-finite scale maps as 1.
    pub scale: f32,
}

impl Default for ViewportMapping {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewportMapping {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            origin: Vec2::zero(),
            border: Vec2::zero(),
            padding: Vec2::zero(),
            scale: 1.0,
        }
    }

    #[inline]
    pub const fn with_origin(origin: Vec2) -> Self {
        Self { origin, ..Self::identity() }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn to_canvas(&self, viewport_pos: Vec2) -> Vec2 {
        let p = viewport_pos - self.origin - self.border - self.padding;
        let scale = self.effective_scale();
        if scale == 1.0 { p } else { p / scale }
    }

    pub fn to_viewport(&self, canvas_pos: Vec2) -> Vec2 {
        canvas_pos * self.effective_scale() + self.origin + self.border + self.padding
    }

    fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale != 0.0 {
            self.scale
        } else {
            log::warn!("ViewportMapping: unusable scale {}, mapping unscaled", self.scale);
            1.0
        }
    }
}
