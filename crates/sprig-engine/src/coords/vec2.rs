use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use super::{AngleUnit, EPSILON};

/// 2D vector (points and directions alike).
///
/// Equality is tolerant: two vectors compare equal when each component differs
/// by at most [`EPSILON`]. Use [`Vec2::approx_eq_eps`] for another tolerance.
#[derive(Debug, Copy, Clone, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const X_AXIS: Vec2 = Vec2::new(1.0, 0.0);
    pub const Y_AXIS: Vec2 = Vec2::new(0.0, 1.0);
    pub const NEG_X_AXIS: Vec2 = Vec2::new(-1.0, 0.0);
    pub const NEG_Y_AXIS: Vec2 = Vec2::new(0.0, -1.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn approx_eq_eps(self, other: Vec2, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    #[inline]
    pub fn sum(left: Vec2, right: Vec2) -> Vec2 {
        left + right
    }

    /// `end - start`.
    #[inline]
    pub fn difference(end: Vec2, start: Vec2) -> Vec2 {
        end - start
    }

    #[inline]
    pub fn scale(direction: Vec2, scalar: f32) -> Vec2 {
        direction * scalar
    }

    /// Moves `start` by `scalar` units along `direction`.
    #[inline]
    pub fn scale_add(start: Vec2, direction: Vec2, scalar: f32) -> Vec2 {
        start + direction * scalar
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Z component of the 3D cross product of `(x, y, 0)` vectors.
    ///
    /// Positive when `rhs` is counter-clockwise from `self` in a +Y up frame
    /// (clockwise on a +Y down canvas).
    #[inline]
    pub fn cross(self, rhs: Vec2) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    #[inline]
    pub fn squared_length(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.squared_length().sqrt()
    }

    /// Normalizes in place and returns the length before normalization.
    ///
    /// A zero-length vector is not an error: it is set to `(0, 0)` and `0.0` is
    /// returned. A vector that is already unit length is left untouched.
    pub fn normalize(&mut self) -> f32 {
        let len = self.length();
        if len.abs() <= EPSILON {
            self.x = 0.0;
            self.y = 0.0;
            return 0.0;
        }
        if (len - 1.0).abs() <= EPSILON {
            return 1.0;
        }
        self.x /= len;
        self.y /= len;
        len
    }

    /// Returns a normalized copy (see [`Vec2::normalize`] for the zero policy).
    #[inline]
    pub fn normalized(mut self) -> Vec2 {
        self.normalize();
        self
    }

    /// Flips the direction in place.
    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    /// Unsigned angle between two vectors, `acos(dot / (|a| |b|))`.
    ///
    /// Returns NaN when either vector has zero length.
    pub fn angle_between(a: Vec2, b: Vec2, unit: AngleUnit) -> f32 {
        let cos = (a.dot(b) / (a.length() * b.length())).clamp(-1.0, 1.0);
        unit.from_radians(cos.acos())
    }

    /// Heading of the direction `to - from`, `atan2(dy, dx)`.
    pub fn orientation(from: Vec2, to: Vec2, unit: AngleUnit) -> f32 {
        let diff = to - from;
        unit.from_radians(diff.y.atan2(diff.x))
    }

    /// Sine of the signed angle from `a` to `b`.
    ///
    /// Equals the sine only for unit vectors; pass `normalize = true` otherwise.
    pub fn sin_angle(a: Vec2, b: Vec2, normalize: bool) -> f32 {
        let (a, b) = if normalize { (a.normalized(), b.normalized()) } else { (a, b) };
        a.cross(b)
    }

    /// Cosine of the angle from `a` to `b`.
    ///
    /// Equals the cosine only for unit vectors; pass `normalize = true` otherwise.
    pub fn cos_angle(a: Vec2, b: Vec2, normalize: bool) -> f32 {
        let (a, b) = if normalize { (a.normalized(), b.normalized()) } else { (a, b) };
        a.dot(b)
    }
}

impl PartialEq for Vec2 {
    #[inline]
    fn eq(&self, other: &Vec2) -> bool {
        self.approx_eq_eps(*other, EPSILON)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Mutates the receiver.
impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}
