use core::ops::{Deref, DerefMut};

use crate::error::{Result, SceneError};

use super::{AffineMatrix, AngleUnit, Vec2};

/// Stack of affine matrices; all operations act on the top entry.
///
/// Invariant: the stack is never empty. It starts as `[identity]` and
/// [`pop_matrix`](Self::pop_matrix) refuses to remove the last entry.
///
/// Prefer [`scope`](Self::scope) or [`with_pushed`](Self::with_pushed) over
/// manual push/pop pairs: both guarantee the pop on every exit path.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    mats: Vec<AffineMatrix>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self { mats: vec![AffineMatrix::IDENTITY] }
    }

    /// Current (top) matrix.
    #[inline]
    pub fn top(&self) -> &AffineMatrix {
        // Non-empty by construction.
        &self.mats[self.mats.len() - 1]
    }

    #[inline]
    fn top_mut(&mut self) -> &mut AffineMatrix {
        let last = self.mats.len() - 1;
        &mut self.mats[last]
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.mats.len()
    }

    /// Duplicates the top so later operations can be undone with a pop.
    pub fn push_matrix(&mut self) {
        let top = *self.top();
        self.mats.push(top);
    }

    /// Removes the top.
    ///
    /// Fails with [`SceneError::StackUnderflow`] when only the base entry is left.
    pub fn pop_matrix(&mut self) -> Result<()> {
        if self.mats.len() <= 1 {
            log::error!("MatrixStack::pop_matrix: pop without matching push");
            return Err(SceneError::StackUnderflow { stack: "matrix" });
        }
        self.mats.pop();
        Ok(())
    }

    pub fn load_identity(&mut self) {
        *self.top_mut() = AffineMatrix::IDENTITY;
    }

    pub fn load_matrix(&mut self, mat: &AffineMatrix) {
        *self.top_mut() = *mat;
    }

    /// `top = top * mat`; every convenience transform folds in through here.
    pub fn mult_matrix(&mut self, mat: &AffineMatrix) {
        let top = *self.top();
        AffineMatrix::multiply_into(&top, mat, self.top_mut());
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.mult_matrix(&AffineMatrix::translation(x, y));
    }

    pub fn rotate(&mut self, angle: f32, unit: AngleUnit) {
        self.mult_matrix(&AffineMatrix::rotation(unit.to_radians(angle)));
    }

    pub fn rotate_from(&mut self, v1: Vec2, v2: Vec2, normalize: bool) {
        self.mult_matrix(&AffineMatrix::rotation_from_vectors(v1, v2, normalize));
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.mult_matrix(&AffineMatrix::scaling(x, y));
    }

    /// Inverse of the top, or [`SceneError::SingularMatrix`].
    pub fn invert(&self) -> Result<AffineMatrix> {
        self.top().inverse()
    }

    /// Pushes now and pops when the returned guard is dropped.
    pub fn scope(&mut self) -> MatrixScope<'_> {
        self.push_matrix();
        MatrixScope { stack: self }
    }

    /// Runs `f` between a push and a pop; the pop happens even if `f` returns early.
    pub fn with_pushed<R>(&mut self, f: impl FnOnce(&mut MatrixStack) -> R) -> R {
        let mut scope = self.scope();
        f(&mut *scope)
    }
}

/// Guard returned by [`MatrixStack::scope`].
///
/// Derefs to the stack; dropping it pops the entry pushed on creation.
#[derive(Debug)]
pub struct MatrixScope<'a> {
    stack: &'a mut MatrixStack,
}

impl Deref for MatrixScope<'_> {
    type Target = MatrixStack;
    fn deref(&self) -> &MatrixStack {
        self.stack
    }
}

impl DerefMut for MatrixScope<'_> {
    fn deref_mut(&mut self) -> &mut MatrixStack {
        self.stack
    }
}

impl Drop for MatrixScope<'_> {
    fn drop(&mut self) {
        // Only fails if the caller popped through the guard without pushing.
        if self.stack.pop_matrix().is_err() {
            log::error!("MatrixScope dropped with unbalanced stack");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── invariants ────────────────────────────────────────────────────────

    #[test]
    fn new_stack_holds_identity() {
        let stack = MatrixStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.top(), AffineMatrix::IDENTITY);
    }

    #[test]
    fn pop_on_fresh_stack_underflows() {
        let mut stack = MatrixStack::new();
        assert_eq!(stack.pop_matrix(), Err(SceneError::StackUnderflow { stack: "matrix" }));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn balanced_sequence_restores_depth_and_top() {
        let mut stack = MatrixStack::new();
        stack.translate(3.0, 4.0);
        let before = *stack.top();

        stack.push_matrix();
        stack.rotate(30.0, AngleUnit::Degrees);
        stack.push_matrix();
        stack.scale(2.0, 2.0);
        stack.translate(-1.0, 8.0);
        stack.pop_matrix().unwrap();
        stack.rotate_from(Vec2::X_AXIS, Vec2::Y_AXIS, false);
        stack.pop_matrix().unwrap();

        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.top(), before);
    }

    // ── accumulation ──────────────────────────────────────────────────────

    #[test]
    fn convenience_ops_fold_in_call_order() {
        let mut stack = MatrixStack::new();
        stack.translate(10.0, 0.0);
        stack.rotate(90.0, AngleUnit::Degrees);
        stack.scale(2.0, 1.0);
        let p = stack.top().transform_point(Vec2::X_AXIS);
        assert!(p.approx_eq_eps(Vec2::new(10.0, 2.0), 1e-4));
    }

    #[test]
    fn load_identity_and_load_matrix_replace_top_only() {
        let mut stack = MatrixStack::new();
        stack.translate(1.0, 1.0);
        stack.push_matrix();
        stack.load_matrix(&AffineMatrix::scaling(5.0, 5.0));
        assert_eq!(*stack.top(), AffineMatrix::scaling(5.0, 5.0));
        stack.load_identity();
        assert_eq!(*stack.top(), AffineMatrix::IDENTITY);
        stack.pop_matrix().unwrap();
        assert_eq!(*stack.top(), AffineMatrix::translation(1.0, 1.0));
    }

    #[test]
    fn invert_top() {
        let mut stack = MatrixStack::new();
        stack.translate(4.0, -2.0);
        assert_eq!(stack.invert().unwrap(), AffineMatrix::translation(-4.0, 2.0));
        stack.scale(0.0, 1.0);
        assert!(stack.invert().is_err());
    }

    // ── scoped discipline ─────────────────────────────────────────────────

    #[test]
    fn scope_pops_on_drop() {
        let mut stack = MatrixStack::new();
        {
            let mut scope = stack.scope();
            scope.translate(5.0, 5.0);
            assert_eq!(scope.depth(), 2);
        }
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.top(), AffineMatrix::IDENTITY);
    }

    #[test]
    fn with_pushed_pops_on_early_return() {
        fn fallible(stack: &mut MatrixStack) -> Result<()> {
            stack.scale(0.0, 0.0);
            stack.invert()?;
            Ok(())
        }

        let mut stack = MatrixStack::new();
        let res = stack.with_pushed(fallible);
        assert!(res.is_err());
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.top(), AffineMatrix::IDENTITY);
    }
}
