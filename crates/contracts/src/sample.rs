//! Buffered sample types produced by the capture core.

use serde::{Deserialize, Serialize};

/// One colored 3-D point observed at a moment in time.
///
/// `position` already carries the export sign convention: Y and Z are negated
/// relative to the raw projection output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSample {
    /// Depth stream device timestamp; grouping key only, never arithmetic
    pub timestamp: f64,

    /// Sensor-space position (x, -y, -z relative to the projection output)
    pub position: [f32; 3],

    /// Sampled texture color (r, g, b)
    pub color: [u8; 3],

    /// Sampled infrared intensity
    pub infrared: u8,
}

impl PointSample {
    /// Grouping key for export: equality by raw bit pattern.
    #[inline]
    pub fn group_key(&self) -> u64 {
        self.timestamp.to_bits()
    }
}

/// One inertial reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Frame-sequence tick; comparable only to other motion samples
    pub timestamp: u64,

    /// Angular velocity (rad/s) or linear acceleration (m/s²), per `kind`
    pub vector: [f32; 3],

    /// Which inertial stream produced the reading
    pub kind: MotionKind,
}

/// Inertial stream kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionKind {
    Gyroscope,
    Accelerometer,
}

impl MotionKind {
    /// Stable integer code used in the motion log.
    pub fn code(&self) -> u8 {
        match self {
            MotionKind::Gyroscope => 0,
            MotionKind::Accelerometer => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_equality_is_bitwise() {
        let a = PointSample {
            timestamp: 17.25,
            position: [0.0; 3],
            color: [0; 3],
            infrared: 0,
        };
        let b = PointSample { timestamp: 17.25, ..a };
        let c = PointSample { timestamp: 17.26, ..a };
        assert_eq!(a.group_key(), b.group_key());
        assert_ne!(a.group_key(), c.group_key());
    }

    #[test]
    fn motion_kind_codes_are_stable() {
        assert_eq!(MotionKind::Gyroscope.code(), 0);
        assert_eq!(MotionKind::Accelerometer.code(), 1);
    }
}
