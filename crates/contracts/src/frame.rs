//! DriverFrame - the unit of delivery from the sensor driver
//!
//! One callback invocation carries exactly one `DriverFrame`.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One frame delivered by the sensor driver.
///
/// A tagged union so that frame-kind dispatch is an exhaustive match rather
/// than a runtime type-test chain.
#[derive(Debug, Clone)]
pub enum DriverFrame {
    /// Synchronized depth + color (+ infrared) bundle captured at one tick
    FrameSet(FrameSet),

    /// Independent inertial reading
    Motion(MotionFrame),

    /// Frame kind the driver could not describe; always a fatal condition
    Unknown {
        /// Driver-side description of the frame, for the diagnostic message
        details: String,
    },
}

/// Synchronized frame set.
///
/// Sub-streams are optional at the wire level; the classifier resolves the
/// mandatory references and raises fatal errors for missing ones.
#[derive(Debug, Clone, Default)]
pub struct FrameSet {
    /// Depth sub-frame (mandatory for processing)
    pub depth: Option<VideoFrame>,

    /// Color sub-frame
    pub color: Option<VideoFrame>,

    /// Infrared sub-frame
    pub infrared: Option<VideoFrame>,

    /// Depth stream device timestamp (milliseconds, device epoch)
    pub timestamp: f64,

    /// Frame-sequence number, for ordering/diagnostics
    pub frame_number: u64,
}

/// One 2D sub-frame payload (zero-copy).
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Bytes per pixel
    pub bytes_per_pixel: u32,

    /// Row stride in bytes (>= width * bytes_per_pixel)
    pub stride_bytes: u32,

    /// Raw pixel data
    pub data: Bytes,
}

impl VideoFrame {
    /// Minimum payload length implied by the declared geometry.
    pub fn expected_len(&self) -> usize {
        self.stride_bytes as usize * self.height as usize
    }
}

/// One inertial frame as delivered by the driver.
#[derive(Debug, Clone, Copy)]
pub struct MotionFrame {
    /// Declared stream type
    pub stream: MotionStream,

    /// Declared sample format
    pub format: MotionFormat,

    /// Raw 3-axis value (angular velocity or linear acceleration)
    pub vector: [f32; 3],

    /// Frame-sequence number; becomes the motion sample timestamp
    pub frame_number: u64,
}

/// Stream type declared on a motion frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionStream {
    Gyroscope,
    Accelerometer,
    /// Any other stream the driver routes through the motion path
    Other,
}

/// Sample format declared on a motion frame.
///
/// Only `MotionXyz32F` is consumable; everything else is silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionFormat {
    MotionXyz32F,
    Other,
}
