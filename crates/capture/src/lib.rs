//! # Capture
//!
//! The concurrent frame-ingestion core.
//!
//! Responsibilities:
//! - Classify incoming driver frames (frame set / motion / unrecognized)
//! - Gate the first frame sets while sensor auto-exposure stabilizes
//! - Project depth frames and sample per-vertex color/infrared texture
//! - Accumulate point and motion samples in mutex-protected buffers
//!
//! The core spawns no threads; it only reacts inside the driver's callback,
//! which may be invoked concurrently from multiple driver threads.

pub mod buffer;
pub mod classifier;
pub mod metrics;
pub mod sampler;
pub mod session;
pub mod warmup;

pub use buffer::{AppendOutcome, MotionBuffer, PointBuffer};
pub use classifier::{classify, Classified, ResolvedSet};
pub use metrics::{CaptureMetrics, MetricsSnapshot};
pub use session::{CaptureSession, IngestOutcome};
pub use warmup::WarmupGate;
