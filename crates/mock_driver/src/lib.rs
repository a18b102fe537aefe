//! Mock depth camera driver
//!
//! Implements the `DepthDriver` and `ProjectionEngine` traits against
//! generated data, so the whole pipeline runs without camera hardware.

pub mod camera;
pub mod projector;

pub use camera::{MockCameraConfig, MockDepthCamera};
pub use projector::GridProjector;
