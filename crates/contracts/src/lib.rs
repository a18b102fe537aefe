//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Frame sets carry the depth stream's device timestamp (milliseconds, f64),
//!   which is the authoritative grouping key for export
//! - Motion frames carry only a frame-sequence number (u64), comparable solely
//!   to other motion frames

mod blueprint;
mod driver;
mod error;
mod frame;
mod sample;

pub use blueprint::*;
pub use driver::{DepthDriver, FrameCallback, PointProjection, ProjectionEngine};
pub use error::*;
pub use frame::*;
pub use sample::*;
