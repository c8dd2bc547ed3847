use core::ops::Mul;

use crate::error::{Result, SceneError};

use super::{Vec2, EPSILON};

/// 2x3 affine transform with an implicit `[0, 0, 1]` bottom row.
///
/// Layout:
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0  1  |
/// ```
///
/// Points are column vectors: `p' = (a*x + c*y + tx, b*x + d*y + ty)`.
/// `multiply(L, R)` returns `L * R`, which applies `R` to a point first and
/// then `L`. Multiplication is associative but not commutative.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AffineMatrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineMatrix {
    pub const IDENTITY: AffineMatrix = AffineMatrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[inline]
    pub fn rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    #[inline]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation that turns the direction of `v1` onto the direction of `v2`.
    ///
    /// The cosine/sine are the dot/cross products of the inputs, so they must be
    /// unit length unless `normalize` is set.
    pub fn rotation_from_vectors(v1: Vec2, v2: Vec2, normalize: bool) -> Self {
        let cos = Vec2::cos_angle(v1, v2, normalize);
        let sin = Vec2::sin_angle(v1, v2, normalize);
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Returns `left * right`.
    #[inline]
    pub fn multiply(left: &AffineMatrix, right: &AffineMatrix) -> AffineMatrix {
        let mut out = AffineMatrix::IDENTITY;
        Self::multiply_into(left, right, &mut out);
        out
    }

    /// Writes `left * right` into `out` without allocating.
    ///
    /// All inputs are read before `out` is written, so `out` may hold a copy of
    /// either operand.
    pub fn multiply_into(left: &AffineMatrix, right: &AffineMatrix, out: &mut AffineMatrix) {
        let (a0, a1, a2, a3, a4, a5) = (left.a, left.b, left.c, left.d, left.tx, left.ty);
        let (b0, b1, b2, b3, b4, b5) = (right.a, right.b, right.c, right.d, right.tx, right.ty);

        out.a = a0 * b0 + a2 * b1;
        out.b = a1 * b0 + a3 * b1;
        out.c = a0 * b2 + a2 * b3;
        out.d = a1 * b2 + a3 * b3;
        out.tx = a0 * b4 + a2 * b5 + a4;
        out.ty = a1 * b4 + a3 * b5 + a5;
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.c * self.b
    }

    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > EPSILON
    }

    /// Writes the inverse of `src` into `out`.
    ///
    /// Returns `false` and leaves `out` untouched when `src` is singular.
    pub fn invert(src: &AffineMatrix, out: &mut AffineMatrix) -> bool {
        let det = src.determinant();
        if det.abs() <= EPSILON {
            return false;
        }
        let inv = 1.0 / det;
        let m = *src;

        out.a = m.d * inv;
        out.b = -m.b * inv;
        out.c = -m.c * inv;
        out.d = m.a * inv;
        out.tx = (m.c * m.ty - m.d * m.tx) * inv;
        out.ty = (m.b * m.tx - m.a * m.ty) * inv;
        true
    }

    /// Returns the inverse, or [`SceneError::SingularMatrix`].
    pub fn inverse(&self) -> Result<AffineMatrix> {
        let mut out = AffineMatrix::IDENTITY;
        if Self::invert(self, &mut out) {
            Ok(out)
        } else {
            Err(SceneError::SingularMatrix { determinant: self.determinant() })
        }
    }

    /// Inverts a pure rotation in place by swapping the sine terms.
    ///
    /// Only valid for matrices built by [`AffineMatrix::rotation`] or
    /// [`AffineMatrix::rotation_from_vectors`].
    #[inline]
    pub fn invert_rotation_only(&mut self) -> &mut Self {
        core::mem::swap(&mut self.b, &mut self.c);
        self
    }

    #[inline]
    pub fn copy_into(&self, out: &mut AffineMatrix) {
        *out = *self;
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Transforms a direction (translation ignored).
    #[inline]
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Image of the local +X axis.
    #[inline]
    pub fn x_axis(&self) -> Vec2 {
        Vec2::new(self.a, self.b)
    }

    /// Image of the local +Y axis.
    #[inline]
    pub fn y_axis(&self) -> Vec2 {
        Vec2::new(self.c, self.d)
    }

    #[inline]
    pub fn translation_part(&self) -> Vec2 {
        Vec2::new(self.tx, self.ty)
    }

    pub fn approx_eq_eps(&self, other: &AffineMatrix, eps: f32) -> bool {
        let l = [self.a, self.b, self.c, self.d, self.tx, self.ty];
        let r = [other.a, other.b, other.c, other.d, other.tx, other.ty];
        l.iter().zip(r.iter()).all(|(x, y)| (x - y).abs() <= eps)
    }

    #[inline]
    pub fn approx_eq(&self, other: &AffineMatrix) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }
}

impl Mul for AffineMatrix {
    type Output = AffineMatrix;
    #[inline]
    fn mul(self, rhs: AffineMatrix) -> AffineMatrix {
        AffineMatrix::multiply(&self, &rhs)
    }
}

impl Mul<Vec2> for AffineMatrix {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.transform_point(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    fn samples() -> Vec<AffineMatrix> {
        vec![
            AffineMatrix::translation(10.0, -4.0),
            AffineMatrix::rotation(0.7),
            AffineMatrix::scaling(2.0, 0.5),
            AffineMatrix::translation(3.0, 2.0) * AffineMatrix::rotation(-1.2) * AffineMatrix::scaling(1.5, 3.0),
            AffineMatrix::new(1.0, 0.5, 0.25, 2.0, 7.0, -9.0),
        ]
    }

    // ── factories ─────────────────────────────────────────────────────────

    #[test]
    fn rotation_90_maps_x_to_y() {
        let p = AffineMatrix::rotation(FRAC_PI_2).transform_point(Vec2::X_AXIS);
        assert!(p.approx_eq_eps(Vec2::Y_AXIS, 1e-4));
    }

    #[test]
    fn translation_moves_points_not_vectors() {
        let m = AffineMatrix::translation(5.0, 6.0);
        assert_eq!(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(6.0, 7.0));
        assert_eq!(m.transform_vector(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn rotation_from_vectors_matches_angle() {
        let m = AffineMatrix::rotation_from_vectors(Vec2::new(2.0, 0.0), Vec2::new(0.0, 5.0), true);
        assert!(m.approx_eq_eps(&AffineMatrix::rotation(FRAC_PI_2), 1e-5));
        let p = m.transform_point(Vec2::new(3.0, 0.0));
        assert!(p.approx_eq_eps(Vec2::new(0.0, 3.0), 1e-5));
    }

    // ── multiply ──────────────────────────────────────────────────────────

    #[test]
    fn multiply_applies_right_first() {
        let t = AffineMatrix::translation(10.0, 0.0);
        let r = AffineMatrix::rotation(FRAC_PI_2);
        // rotate (1,0) -> (0,1), then translate -> (10,1)
        let p = AffineMatrix::multiply(&t, &r).transform_point(Vec2::X_AXIS);
        assert!(p.approx_eq_eps(Vec2::new(10.0, 1.0), 1e-5));
        // translate (1,0) -> (11,0), then rotate -> (0,11)
        let q = AffineMatrix::multiply(&r, &t).transform_point(Vec2::X_AXIS);
        assert!(q.approx_eq_eps(Vec2::new(0.0, 11.0), 1e-4));
    }

    #[test]
    fn multiply_is_associative() {
        let m = samples();
        let left = (m[0] * m[1]) * m[2];
        let right = m[0] * (m[1] * m[2]);
        assert!(left.approx_eq_eps(&right, 1e-4));
    }

    #[test]
    fn multiply_into_tolerates_operand_copy() {
        let a = AffineMatrix::translation(1.0, 2.0);
        let b = AffineMatrix::scaling(3.0, 3.0);
        let mut out = a;
        AffineMatrix::multiply_into(&a, &b, &mut out);
        assert!(out.approx_eq(&(a * b)));
    }

    // ── inverse ───────────────────────────────────────────────────────────

    #[test]
    fn matrix_times_inverse_is_identity() {
        for m in samples() {
            let inv = m.inverse().unwrap();
            assert!((m * inv).approx_eq_eps(&AffineMatrix::IDENTITY, 1e-4), "{m:?}");
            assert!((inv * m).approx_eq_eps(&AffineMatrix::IDENTITY, 1e-4), "{m:?}");
        }
    }

    #[test]
    fn singular_matrix_reports_false_and_error() {
        let m = AffineMatrix::scaling(0.0, 4.0);
        let mut out = AffineMatrix::translation(1.0, 1.0);
        assert!(!AffineMatrix::invert(&m, &mut out));
        assert_eq!(out, AffineMatrix::translation(1.0, 1.0));
        assert!(matches!(m.inverse(), Err(SceneError::SingularMatrix { .. })));
    }

    #[test]
    fn rotation_only_inverse_is_transpose() {
        let r = AffineMatrix::rotation(0.4);
        let mut inv = r;
        inv.invert_rotation_only();
        assert!(inv.approx_eq_eps(&r.inverse().unwrap(), 1e-5));
    }

    #[test]
    fn determinant_of_scale() {
        assert_eq!(AffineMatrix::scaling(2.0, 3.0).determinant(), 6.0);
    }
}
