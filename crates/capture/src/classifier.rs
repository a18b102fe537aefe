//! Frame classifier
//!
//! Decides what one incoming driver frame is and resolves the sub-stream
//! references a frame set needs for sampling. An unrecognized frame kind is a
//! driver/configuration mismatch the system cannot safely interpret, so it is
//! fatal rather than silently dropped.

use contracts::{
    CaptureError, DriverFrame, MotionFormat, MotionKind, MotionSample, MotionStream, VideoFrame,
};

/// Classification result for one driver frame.
#[derive(Debug)]
pub enum Classified<'a> {
    /// Synchronized set with all references resolved
    FrameSet(ResolvedSet<'a>),
    /// Accepted inertial reading
    Motion(MotionSample),
    /// Motion frame with an unaccepted stream/format combination
    Ignored,
}

/// A frame set with its color, infrared, and depth references resolved.
#[derive(Debug)]
pub struct ResolvedSet<'a> {
    /// Depth reference (mandatory)
    pub depth: &'a VideoFrame,
    /// Color reference; falls back to infrared when color is absent
    pub color: &'a VideoFrame,
    /// Infrared reference; falls back to color when infrared is absent
    pub infrared: &'a VideoFrame,
    /// Depth stream device timestamp
    pub timestamp: f64,
    /// Frame-sequence number
    pub frame_number: u64,
}

/// Classify one incoming frame.
///
/// # Errors
/// - `UnrecognizedFrame` for an unknown frame kind (fatal)
/// - `MissingStream` when a frame set lacks depth, or both color and infrared
///   (fatal)
pub fn classify(frame: &DriverFrame) -> Result<Classified<'_>, CaptureError> {
    match frame {
        DriverFrame::FrameSet(set) => {
            let color = set
                .color
                .as_ref()
                .or(set.infrared.as_ref())
                .ok_or_else(|| CaptureError::missing_stream("colour"))?;
            let infrared = set
                .infrared
                .as_ref()
                .or(set.color.as_ref())
                .ok_or_else(|| CaptureError::missing_stream("infrared"))?;
            let depth = set
                .depth
                .as_ref()
                .ok_or_else(|| CaptureError::missing_stream("depth"))?;

            Ok(Classified::FrameSet(ResolvedSet {
                depth,
                color,
                infrared,
                timestamp: set.timestamp,
                frame_number: set.frame_number,
            }))
        }

        DriverFrame::Motion(motion) => {
            let kind = match (motion.stream, motion.format) {
                (MotionStream::Gyroscope, MotionFormat::MotionXyz32F) => MotionKind::Gyroscope,
                (MotionStream::Accelerometer, MotionFormat::MotionXyz32F) => {
                    MotionKind::Accelerometer
                }
                // Anything else is dropped silently; not buffered, not fatal
                _ => return Ok(Classified::Ignored),
            };

            Ok(Classified::Motion(MotionSample {
                timestamp: motion.frame_number,
                vector: motion.vector,
                kind,
            }))
        }

        DriverFrame::Unknown { details } => Err(CaptureError::unrecognized_frame(details)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use contracts::{FrameSet, MotionFrame};

    fn video(width: u32, height: u32, bpp: u32) -> VideoFrame {
        VideoFrame {
            width,
            height,
            bytes_per_pixel: bpp,
            stride_bytes: width * bpp,
            data: Bytes::from(vec![0u8; (width * bpp * height) as usize]),
        }
    }

    fn full_set() -> FrameSet {
        FrameSet {
            depth: Some(video(4, 4, 2)),
            color: Some(video(8, 8, 3)),
            infrared: Some(video(8, 8, 1)),
            timestamp: 123.5,
            frame_number: 7,
        }
    }

    #[test]
    fn test_resolves_all_references() {
        let frame = DriverFrame::FrameSet(full_set());
        match classify(&frame).unwrap() {
            Classified::FrameSet(set) => {
                assert_eq!(set.color.bytes_per_pixel, 3);
                assert_eq!(set.infrared.bytes_per_pixel, 1);
                assert_eq!(set.depth.bytes_per_pixel, 2);
                assert_eq!(set.timestamp, 123.5);
            }
            other => panic!("expected frame set, got {other:?}"),
        }
    }

    #[test]
    fn test_color_falls_back_to_infrared() {
        let mut set = full_set();
        set.color = None;
        match classify(&DriverFrame::FrameSet(set)).unwrap() {
            Classified::FrameSet(resolved) => {
                // Both references point at the infrared sub-frame
                assert_eq!(resolved.color.bytes_per_pixel, 1);
                assert_eq!(resolved.infrared.bytes_per_pixel, 1);
            }
            other => panic!("expected frame set, got {other:?}"),
        }
    }

    #[test]
    fn test_infrared_falls_back_to_color() {
        let mut set = full_set();
        set.infrared = None;
        match classify(&DriverFrame::FrameSet(set)).unwrap() {
            Classified::FrameSet(resolved) => {
                assert_eq!(resolved.infrared.bytes_per_pixel, 3);
            }
            other => panic!("expected frame set, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_both_textures_is_fatal() {
        let mut set = full_set();
        set.color = None;
        set.infrared = None;
        let err = classify(&DriverFrame::FrameSet(set)).unwrap_err();
        assert!(matches!(err, CaptureError::MissingStream { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_depth_is_fatal() {
        let mut set = full_set();
        set.depth = None;
        let err = classify(&DriverFrame::FrameSet(set)).unwrap_err();
        assert!(err.to_string().contains("depth"));
    }

    #[test]
    fn test_accepted_motion_combinations() {
        for (stream, kind) in [
            (MotionStream::Gyroscope, MotionKind::Gyroscope),
            (MotionStream::Accelerometer, MotionKind::Accelerometer),
        ] {
            let frame = DriverFrame::Motion(MotionFrame {
                stream,
                format: MotionFormat::MotionXyz32F,
                vector: [0.1, 0.2, 0.3],
                frame_number: 42,
            });
            match classify(&frame).unwrap() {
                Classified::Motion(sample) => {
                    assert_eq!(sample.kind, kind);
                    assert_eq!(sample.timestamp, 42);
                    assert_eq!(sample.vector, [0.1, 0.2, 0.3]);
                }
                other => panic!("expected motion, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unaccepted_motion_is_silently_ignored() {
        let cases = [
            (MotionStream::Other, MotionFormat::MotionXyz32F),
            (MotionStream::Gyroscope, MotionFormat::Other),
            (MotionStream::Other, MotionFormat::Other),
        ];
        for (stream, format) in cases {
            let frame = DriverFrame::Motion(MotionFrame {
                stream,
                format,
                vector: [0.0; 3],
                frame_number: 1,
            });
            assert!(matches!(classify(&frame).unwrap(), Classified::Ignored));
        }
    }

    #[test]
    fn test_unknown_frame_is_fatal() {
        let frame = DriverFrame::Unknown {
            details: "pose frame".to_string(),
        };
        let err = classify(&frame).unwrap_err();
        assert!(matches!(err, CaptureError::UnrecognizedFrame { .. }));
        assert!(err.is_fatal());
    }
}
