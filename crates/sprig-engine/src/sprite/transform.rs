use crate::coords::{AffineMatrix, AngleUnit, MatrixStack, Vec2};

/// Position, rotation (degrees) and scale of a node relative to its parent.
///
/// The local matrix `T(position) * R(rotation) * S(scale)` is derived on
/// demand and never stored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self { position: Vec2::zero(), rotation: 0.0, scale: Vec2::new(1.0, 1.0) }
    }
}

impl Transform {
    pub fn new(x: f32, y: f32, rotation: f32, scale_x: f32, scale_y: f32) -> Self {
        Self { position: Vec2::new(x, y), rotation, scale: Vec2::new(scale_x, scale_y) }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y), ..Self::default() }
    }

    /// Composes the local matrix on a caller-owned stack and returns its top.
    ///
    /// The stack's top is overwritten; its depth is unchanged.
    pub fn to_matrix_with(&self, stack: &mut MatrixStack) -> AffineMatrix {
        stack.load_identity();
        stack.translate(self.position.x, self.position.y);
        stack.rotate(self.rotation, AngleUnit::Degrees);
        stack.scale(self.scale.x, self.scale.y);
        *stack.top()
    }

    pub fn to_matrix(&self) -> AffineMatrix {
        self.to_matrix_with(&mut MatrixStack::new())
    }

    /// Writes the inverse local matrix to `out`; `false` when it is singular.
    pub fn to_inverse_matrix(&self, out: &mut AffineMatrix) -> bool {
        AffineMatrix::invert(&self.to_matrix(), out)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    #[inline]
    pub fn scale_x(&self) -> f32 {
        self.scale.x
    }

    #[inline]
    pub fn set_scale_x(&mut self, sx: f32) {
        self.scale.x = sx;
    }

    #[inline]
    pub fn scale_y(&self) -> f32 {
        self.scale.y
    }

    #[inline]
    pub fn set_scale_y(&mut self, sy: f32) {
        self.scale.y = sy;
    }
}
