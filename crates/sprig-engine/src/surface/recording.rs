use crate::coords::{AffineMatrix, Rect, Vec2};
use crate::paint::Color;

use super::DrawingSurface;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCmd {
    Save,
    Restore,
    SetTransform(AffineMatrix),
    FillColor(Color),
    StrokeColor(Color),
    LineWidth(f32),
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadraticTo { ctrl: Vec2, end: Vec2 },
    BezierTo { ctrl0: Vec2, ctrl1: Vec2, end: Vec2 },
    Arc { center: Vec2, radius: f32, start_angle: f32, end_angle: f32 },
    Ellipse { center: Vec2, radius_x: f32, radius_y: f32 },
    Rect(Rect),
    ClosePath,
    Fill,
    Stroke,
    Clip,
}

/// Surface that records every call in order.
///
/// Tracks the save depth so unbalanced restores can be detected; a restore
/// without a matching save is recorded anyway and logged.
///
/// Reuses its buffer across frames: call [`clear`](Self::clear) between them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    cmds: Vec<SurfaceCmd>,
    depth: usize,
    unbalanced_restores: usize,
}

impl RecordingSurface {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in call order.
    #[inline]
    pub fn commands(&self) -> &[SurfaceCmd] {
        &self.cmds
    }

    /// Current save depth (saves minus matched restores).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Restores issued with nothing saved.
    #[inline]
    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    /// Number of recorded commands matching `pred`.
    pub fn count(&self, pred: impl Fn(&SurfaceCmd) -> bool) -> usize {
        self.cmds.iter().filter(|c| pred(c)).count()
    }

    /// Drops recorded commands and resets the depth bookkeeping. Keeps capacity.
    pub fn clear(&mut self) {
        self.cmds.clear();
        self.depth = 0;
        self.unbalanced_restores = 0;
    }

    /// Moves the recorded commands out, leaving the surface empty.
    pub fn take(&mut self) -> Vec<SurfaceCmd> {
        self.depth = 0;
        self.unbalanced_restores = 0;
        std::mem::take(&mut self.cmds)
    }

    #[inline]
    fn push(&mut self, cmd: SurfaceCmd) {
        self.cmds.push(cmd);
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.push(SurfaceCmd::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            self.unbalanced_restores += 1;
            log::warn!("RecordingSurface::restore: restore without matching save");
        } else {
            self.depth -= 1;
        }
        self.push(SurfaceCmd::Restore);
    }

    fn set_transform(&mut self, m: &AffineMatrix) {
        self.push(SurfaceCmd::SetTransform(*m));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(SurfaceCmd::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(SurfaceCmd::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.push(SurfaceCmd::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.push(SurfaceCmd::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.push(SurfaceCmd::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.push(SurfaceCmd::LineTo(p));
    }

    fn quadratic_to(&mut self, ctrl: Vec2, end: Vec2) {
        self.push(SurfaceCmd::QuadraticTo { ctrl, end });
    }

    fn bezier_to(&mut self, ctrl0: Vec2, ctrl1: Vec2, end: Vec2) {
        self.push(SurfaceCmd::BezierTo { ctrl0, ctrl1, end });
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        self.push(SurfaceCmd::Arc { center, radius, start_angle, end_angle });
    }

    fn ellipse(&mut self, center: Vec2, radius_x: f32, radius_y: f32) {
        self.push(SurfaceCmd::Ellipse { center, radius_x, radius_y });
    }

    fn rect(&mut self, rect: Rect) {
        self.push(SurfaceCmd::Rect(rect));
    }

    fn close_path(&mut self) {
        self.push(SurfaceCmd::ClosePath);
    }

    fn fill(&mut self) {
        self.push(SurfaceCmd::Fill);
    }

    fn stroke(&mut self) {
        self.push(SurfaceCmd::Stroke);
    }

    fn clip(&mut self) {
        self.push(SurfaceCmd::Clip);
    }
}
