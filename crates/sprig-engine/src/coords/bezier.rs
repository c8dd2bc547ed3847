//! Quadratic and cubic Bézier evaluation.
//!
//! Parameter `t` must lie in `[0, 1]`; anything else is rejected with
//! [`SceneError::InvalidParameterRange`] instead of extrapolating.

use crate::error::{Result, SceneError};

use super::Vec2;

/// Default number of steps per segment used by samplers and paths.
pub const DEFAULT_STEPS: u32 = 30;

/// Upper bound on steps per segment.
pub const MAX_STEPS: u32 = 1 << 16;

/// `(1-t)² s + 2t(1-t) c + t² e`.
pub fn quadratic_position(start: f32, ctrl: f32, end: f32, t: f32) -> Result<f32> {
    SceneError::check_unit_range("t", t)?;
    let k = 1.0 - t;
    Ok(k * k * start + 2.0 * t * k * ctrl + t * t * end)
}

/// `(1-t)³ s + 3t(1-t)² c0 + 3t²(1-t) c1 + t³ e`.
pub fn cubic_position(start: f32, ctrl0: f32, ctrl1: f32, end: f32, t: f32) -> Result<f32> {
    SceneError::check_unit_range("t", t)?;
    let k = 1.0 - t;
    Ok(k * k * k * start + 3.0 * t * k * k * ctrl0 + 3.0 * t * t * k * ctrl1 + t * t * t * end)
}

pub fn quadratic_point(start: Vec2, ctrl: Vec2, end: Vec2, t: f32) -> Result<Vec2> {
    Ok(Vec2::new(
        quadratic_position(start.x, ctrl.x, end.x, t)?,
        quadratic_position(start.y, ctrl.y, end.y, t)?,
    ))
}

pub fn cubic_point(start: Vec2, ctrl0: Vec2, ctrl1: Vec2, end: Vec2, t: f32) -> Result<Vec2> {
    Ok(Vec2::new(
        cubic_position(start.x, ctrl0.x, ctrl1.x, end.x, t)?,
        cubic_position(start.y, ctrl0.y, ctrl1.y, end.y, t)?,
    ))
}

/// Control polygon of a single curve segment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BezierSegment {
    Quadratic { start: Vec2, ctrl: Vec2, end: Vec2 },
    Cubic { start: Vec2, ctrl0: Vec2, ctrl1: Vec2, end: Vec2 },
}

impl BezierSegment {
    pub fn start(&self) -> Vec2 {
        match *self {
            BezierSegment::Quadratic { start, .. } | BezierSegment::Cubic { start, .. } => start,
        }
    }

    pub fn end(&self) -> Vec2 {
        match *self {
            BezierSegment::Quadratic { end, .. } | BezierSegment::Cubic { end, .. } => end,
        }
    }

    pub fn point_at(&self, t: f32) -> Result<Vec2> {
        match *self {
            BezierSegment::Quadratic { start, ctrl, end } => quadratic_point(start, ctrl, end, t),
            BezierSegment::Cubic { start, ctrl0, ctrl1, end } => cubic_point(start, ctrl0, ctrl1, end, t),
        }
    }
}

/// Restartable iterator over `steps + 1` evenly spaced samples of a segment,
/// from `t = 0` to `t = 1` inclusive.
#[derive(Debug, Clone)]
pub struct BezierSampler {
    segment: BezierSegment,
    steps: u32,
    index: u32,
}

impl BezierSampler {
    /// `steps` is clamped to `1..=MAX_STEPS`.
    pub fn new(segment: BezierSegment, steps: u32) -> Self {
        Self { segment, steps: steps.clamp(1, MAX_STEPS), index: 0 }
    }

    pub fn quadratic(start: Vec2, ctrl: Vec2, end: Vec2, steps: u32) -> Self {
        Self::new(BezierSegment::Quadratic { start, ctrl, end }, steps)
    }

    pub fn cubic(start: Vec2, ctrl0: Vec2, ctrl1: Vec2, end: Vec2, steps: u32) -> Self {
        Self::new(BezierSegment::Cubic { start, ctrl0, ctrl1, end }, steps)
    }

    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[inline]
    pub fn segment(&self) -> &BezierSegment {
        &self.segment
    }

    /// Restarts the iteration at `t = 0`.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl Iterator for BezierSampler {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.index > self.steps {
            return None;
        }
        let i = self.index;
        self.index += 1;
        // Endpoints are returned exactly rather than through the polynomial.
        if i == 0 {
            return Some(self.segment.start());
        }
        if i == self.steps {
            return Some(self.segment.end());
        }
        let t = i as f32 / self.steps as f32;
        self.segment.point_at(t).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps.saturating_add(1)).saturating_sub(self.index) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BezierSampler {}
