//! Error types.
//!
//! Every fallible operation in the engine returns [`Result<T>`]. Failures are
//! reported where they are detected and are never fatal to the process: the
//! caller decides whether to skip a node for the frame, retry, or abort.

use thiserror::Error;

use crate::tree::NodeId;

/// Bézier curve degree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CurveDegree {
    Quadratic,
    Cubic,
}

impl CurveDegree {
    /// Control points consumed by one segment after the shared start point.
    #[inline]
    pub const fn points_per_segment(self) -> usize {
        match self {
            CurveDegree::Quadratic => 2,
            CurveDegree::Cubic => 3,
        }
    }
}

/// The main error type for the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Inversion was attempted on a matrix whose determinant is ~0.
    ///
    /// Recoverable: treat the node as having no valid local frame this frame.
    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix { determinant: f32 },

    /// A pop would take a stack below its minimum of one entry.
    ///
    /// This is a logic fault in the caller (unbalanced push/pop).
    #[error("{stack} stack underflow: pop without matching push")]
    StackUnderflow { stack: &'static str },

    /// The operation would create a cycle or break single-parent ownership.
    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    /// The node handle does not refer to a live node.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// Control point count does not match the curve degree.
    #[error("{degree:?} curve needs {} * k + 1 control points (k >= 1), got {points}", .degree.points_per_segment())]
    InvalidCurveDefinition { degree: CurveDegree, points: usize },

    /// A parameter fell outside its allowed range.
    #[error("parameter `{name}` = {value} is outside [{min}, {max}]")]
    InvalidParameterRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl SceneError {
    /// Shorthand for the `[0, 1]` range check used by curve parameters.
    pub(crate) fn check_unit_range(name: &'static str, value: f32) -> Result<()> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(SceneError::InvalidParameterRange { name, value, min: 0.0, max: 1.0 })
        }
    }
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
