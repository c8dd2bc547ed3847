use super::Vec2;

/// Axis-aligned rectangle (top-left origin, size may be negative until normalized).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of size `w x h` whose pivot `(u, v)` (fractions of the size)
    /// sits on the local origin. `(0, 0)` is top-left, `(0.5, 0.5)` centered.
    #[inline]
    pub fn with_pivot(w: f32, h: f32, pivot: Vec2) -> Self {
        Rect::new(-pivot.x * w, -pivot.y * h, w, h)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Closed containment: points on any edge are inside.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x <= r.origin.x + r.size.x
            && p.y <= r.origin.y + r.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_and_edges() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(!rect.contains(Vec2::new(11.0, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, -1.0)));
    }

    // ── pivot ─────────────────────────────────────────────────────────────

    #[test]
    fn centered_pivot_straddles_origin() {
        let rect = Rect::with_pivot(10.0, 4.0, Vec2::new(0.5, 0.5));
        assert_eq!(rect, r(-5.0, -2.0, 10.0, 4.0));
        assert_eq!(rect.center(), Vec2::zero());
    }
}
