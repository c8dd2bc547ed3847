//! Point containment helpers used by shape hit testing.
//!
//! All functions work in a single coordinate space; callers transform the query
//! point into the shape's local space first.

use super::{Rect, Vec2};

/// Tolerance radius used by [`point_on_segment`] when none is given.
pub const DEFAULT_LINE_HIT_RADIUS: f32 = 2.0;

/// Projects `pt` onto the segment `start..end`.
///
/// Returns `(true, projection)` when the projection falls within the segment,
/// otherwise `(false, nearest endpoint)`.
pub fn project_point_on_segment(pt: Vec2, start: Vec2, end: Vec2) -> (bool, Vec2) {
    let v0 = pt - start;
    let mut dir = end - start;
    let len = dir.normalize();
    let t = v0.dot(dir);

    if t < 0.0 {
        (false, start)
    } else if t > len {
        (false, end)
    } else {
        (true, Vec2::scale_add(start, dir, t))
    }
}

/// Squared distance against squared radius; the boundary counts as inside.
#[inline]
pub fn point_in_circle(pt: Vec2, center: Vec2, radius: f32) -> bool {
    (pt - center).squared_length() <= radius * radius
}

/// True when `pt` projects inside the segment and lies within `radius` of it.
pub fn point_on_segment(pt: Vec2, start: Vec2, end: Vec2, radius: f32) -> bool {
    match project_point_on_segment(pt, start, end) {
        (true, closest) => point_in_circle(pt, closest, radius),
        (false, _) => false,
    }
}

#[inline]
pub fn point_in_rect(pt: Vec2, rect: Rect) -> bool {
    rect.contains(pt)
}

/// `(dx / rx)² + (dy / ry)² <= 1`.
pub fn point_in_ellipse(pt: Vec2, center: Vec2, radius_x: f32, radius_y: f32) -> bool {
    let dx = pt.x - center.x;
    let dy = pt.y - center.y;
    (dx * dx) / (radius_x * radius_x) + (dy * dy) / (radius_y * radius_y) <= 1.0
}

/// Cross product of the edges `v2 -> v0` and `v2 -> v1`.
#[inline]
pub fn edge_sign(v0: Vec2, v1: Vec2, v2: Vec2) -> f32 {
    (v0 - v2).cross(v1 - v2)
}

/// Same-side test: `pt` is inside when no two edge signs disagree.
///
/// A zero sign (point on an edge line) is neutral, so points on the boundary
/// are inside regardless of winding.
pub fn point_in_triangle(pt: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> bool {
    let [s0, s1, s2] = triangle_signs(pt, v0, v1, v2);
    !mixed_signs(s0, s1, s2)
}

#[inline]
fn triangle_signs(pt: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> [f32; 3] {
    [edge_sign(v0, v1, pt), edge_sign(v1, v2, pt), edge_sign(v2, v0, pt)]
}

#[inline]
fn mixed_signs(s0: f32, s1: f32, s2: f32) -> bool {
    let neg = s0 < 0.0 || s1 < 0.0 || s2 < 0.0;
    let pos = s0 > 0.0 || s1 > 0.0 || s2 > 0.0;
    neg && pos
}

/// Fan-triangle parity test.
///
/// The polygon is split into triangles `(p0, p[i-1], p[i])`; `pt` is inside when
/// it lies inside an odd number of them. For convex polygons this is plain
/// containment; where fan triangles overlap they cancel out.
///
/// Tie-break: the diagonal `p0 -> p[i]` is shared by two consecutive fan
/// triangles, so a point on it is counted only by the later one. The last
/// triangle's `p0 -> p[n-1]` edge is a polygon edge and counts as inside.
pub fn point_in_polygon(pt: Vec2, points: &[Vec2]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let last = points.len() - 1;
    let hits = (2..points.len())
        .filter(|&i| {
            let [s0, s1, s2] = triangle_signs(pt, points[0], points[i - 1], points[i]);
            !mixed_signs(s0, s1, s2) && (i == last || s2 != 0.0)
        })
        .count();
    hits % 2 == 1
}

/// True when every consecutive vertex triple turns the same way.
pub fn is_convex(points: &[Vec2]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let n = points.len();
    let first = edge_sign(points[0], points[1], points[2]) < 0.0;
    (1..n).all(|i| {
        let j = (i + 1) % n;
        let k = (i + 2) % n;
        (edge_sign(points[i], points[j], points[k]) < 0.0) == first
    })
}
