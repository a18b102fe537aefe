//! DepthDriver / ProjectionEngine traits - external collaborator boundaries
//!
//! The capture core never talks to sensor hardware or projection math
//! directly; it consumes these two traits. Real device backends and mock
//! implementations are interchangeable behind them.

use std::sync::Arc;

use crate::{CaptureError, DriverFrame, VideoFrame};

/// Frame delivery callback type.
///
/// The driver invokes this on its own threads, possibly concurrently and
/// without ordering guarantees between sub-streams. Uses `Arc` so the
/// callback can be shared across driver-internal workers.
pub type FrameCallback = Arc<dyn Fn(DriverFrame) + Send + Sync>;

/// Sensor driver abstraction.
///
/// # Contract
///
/// - `start` registers the callback and begins delivery; repeated calls while
///   running are idempotent.
/// - `stop` must not return until delivery has ceased: no callback invocation
///   may begin after `stop` returns. The export stage's correctness depends
///   on this guarantee.
pub trait DepthDriver: Send + Sync {
    /// Begin delivering frames to `callback`.
    fn start(&self, callback: FrameCallback) -> Result<(), CaptureError>;

    /// Stop delivery; synchronous (drains in-flight callbacks before returning).
    fn stop(&self);

    /// Check whether the driver is currently delivering frames.
    fn is_running(&self) -> bool;
}

/// Depth-to-point-cloud projection engine abstraction.
///
/// Turns a depth frame plus a texture-reference frame into sensor-space
/// vertices with normalized texture coordinates. The core consumes the output
/// and does not reimplement the projection math.
pub trait ProjectionEngine: Send + Sync {
    /// Project `depth` into 3-D vertices, texture-mapped against `texture`.
    fn project(
        &self,
        depth: &VideoFrame,
        texture: &VideoFrame,
    ) -> Result<PointProjection, CaptureError>;
}

/// Output of one projection call: parallel vertex and UV lists.
#[derive(Debug, Clone, Default)]
pub struct PointProjection {
    /// Raw sensor-space vertices (no sign flip applied)
    pub vertices: Vec<[f32; 3]>,

    /// Normalized texture coordinates in [0,1]², parallel to `vertices`
    pub uv: Vec<[f32; 2]>,
}

impl PointProjection {
    /// Number of projected vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when the projection produced no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
