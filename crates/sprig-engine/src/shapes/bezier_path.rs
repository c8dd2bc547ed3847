use crate::coords::bezier::{BezierSampler, BezierSegment, DEFAULT_STEPS, MAX_STEPS};
use crate::coords::Vec2;
use crate::error::{CurveDegree, Result, SceneError};
use crate::surface::DrawingSurface;

use super::{stroke_only, DrawFrame, Shape, ShapeKind};

/// Chain of quadratic or cubic Bézier segments sharing endpoints.
///
/// Control points are laid out `P0 C.. P1 C.. P2 ...`: a quadratic path of `k`
/// segments holds `2k + 1` points, a cubic one `3k + 1`.
///
/// The curve is drawn as a polyline through cached samples (`steps + 1` per
/// segment, endpoints included). Any control point mutation marks the cache
/// dirty; it is rebuilt on the next draw or [`samples`](Self::samples) call.
///
/// Bézier paths are never hit: [`Shape::hit_test`] always returns `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPath {
    points: Vec<Vec2>,
    degree: CurveDegree,
    steps: u32,
    samples: Vec<Vec2>,
    dirty: bool,
}

impl BezierPath {
    pub fn new(points: Vec<Vec2>, degree: CurveDegree) -> Result<Self> {
        let per = degree.points_per_segment();
        if points.len() < per + 1 || (points.len() - 1) % per != 0 {
            return Err(SceneError::InvalidCurveDefinition { degree, points: points.len() });
        }
        Ok(Self { points, degree, steps: DEFAULT_STEPS, samples: Vec::new(), dirty: true })
    }

    pub fn quadratic(points: Vec<Vec2>) -> Result<Self> {
        Self::new(points, CurveDegree::Quadratic)
    }

    pub fn cubic(points: Vec<Vec2>) -> Result<Self> {
        Self::new(points, CurveDegree::Cubic)
    }

    /// Samples per segment minus one; clamped to `1..=MAX_STEPS`.
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.set_steps(steps);
        self
    }

    pub fn set_steps(&mut self, steps: u32) {
        let steps = steps.clamp(1, MAX_STEPS);
        if steps != self.steps {
            self.steps = steps;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[inline]
    pub fn degree(&self) -> CurveDegree {
        self.degree
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        (self.points.len() - 1) / self.degree.points_per_segment()
    }

    /// Moves one control point; returns its previous position, or `None` when
    /// `index` is out of range.
    pub fn set_point(&mut self, index: usize, p: Vec2) -> Option<Vec2> {
        let slot = self.points.get_mut(index)?;
        let old = core::mem::replace(slot, p);
        self.dirty = true;
        Some(old)
    }

    /// Mutable view of the control points. The count cannot change through it;
    /// the cache is marked dirty.
    pub fn points_mut(&mut self) -> &mut [Vec2] {
        self.dirty = true;
        &mut self.points
    }

    /// Iterates the segments in order.
    pub fn segments(&self) -> impl Iterator<Item = BezierSegment> + '_ {
        let per = self.degree.points_per_segment();
        let degree = self.degree;
        (0..self.segment_count()).map(move |i| {
            let p = &self.points[i * per..=i * per + per];
            match degree {
                CurveDegree::Quadratic => BezierSegment::Quadratic { start: p[0], ctrl: p[1], end: p[2] },
                CurveDegree::Cubic => BezierSegment::Cubic { start: p[0], ctrl0: p[1], ctrl1: p[2], end: p[3] },
            }
        })
    }

    /// Cached samples, recomputed first if dirty.
    pub fn samples(&mut self) -> &[Vec2] {
        if self.dirty {
            self.resample();
        }
        &self.samples
    }

    fn resample(&mut self) {
        let steps = self.steps;
        let mut samples = std::mem::take(&mut self.samples);
        samples.clear();
        for seg in self.segments() {
            samples.extend(BezierSampler::new(seg, steps));
        }
        log::debug!("BezierPath: resampled {} segments into {} points", self.segment_count(), samples.len());
        self.samples = samples;
        self.dirty = false;
    }
}

impl Shape for BezierPath {
    fn kind(&self) -> ShapeKind {
        ShapeKind::BezierPath
    }

    fn hit_test(&self, _local: Vec2) -> bool {
        false
    }

    fn trace(&mut self, surface: &mut dyn DrawingSurface) {
        let Some((first, rest)) = self.samples().split_first() else { return };
        surface.move_to(*first);
        for &p in rest {
            surface.line_to(p);
        }
    }

    fn draw(&mut self, frame: &DrawFrame<'_>, surface: &mut dyn DrawingSurface) {
        surface.begin_path();
        self.trace(surface);
        stroke_only(frame, surface);
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }
}
