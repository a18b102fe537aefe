//! Point sampler
//!
//! Turns one projected frame set into a batch of point samples: filters
//! degenerate vertices, flips Y/Z into the export sign convention, and reads
//! per-vertex color and infrared texture bytes.

use contracts::{CaptureError, PointProjection, PointSample, VideoFrame};

use crate::classifier::ResolvedSet;

/// Vertices with all raw coordinates inside this band are missing depth.
pub const MIN_DISTANCE: f32 = 1.0e-6;

/// Build the point batch for one resolved frame set.
///
/// The projection's vertex and UV lists must be parallel; the caller has
/// already rejected empty projections.
///
/// # Errors
/// - `ProjectionMismatch` when the lists disagree in length
/// - `MalformedFrame` when a texture payload is shorter than its declared
///   geometry implies
pub fn sample_points(
    set: &ResolvedSet<'_>,
    projection: &PointProjection,
) -> Result<Vec<PointSample>, CaptureError> {
    if projection.vertices.len() != projection.uv.len() {
        return Err(CaptureError::ProjectionMismatch {
            vertices: projection.vertices.len(),
            uv: projection.uv.len(),
        });
    }
    ensure_payload(set.color, "colour")?;
    ensure_payload(set.infrared, "infrared")?;

    let mut batch = Vec::with_capacity(projection.len());

    for (vertex, uv) in projection.vertices.iter().zip(projection.uv.iter()) {
        let [x, y, z] = *vertex;
        if x.abs() < MIN_DISTANCE && y.abs() < MIN_DISTANCE && z.abs() < MIN_DISTANCE {
            continue;
        }

        let color_index = texel_offset(uv[0], uv[1], set.color);
        let infrared_index = texel_offset(uv[0], uv[1], set.infrared);

        batch.push(PointSample {
            timestamp: set.timestamp,
            // Negated per the right-handed export convention
            position: [x, -y, -z],
            color: texel_color(set.color, color_index),
            infrared: set.infrared.data[infrared_index],
        });
    }

    Ok(batch)
}

/// Map one normalized texture coordinate pair onto a byte offset into `frame`.
///
/// Each axis is scaled by the frame's own dimension, rounded to the nearest
/// integer, and clamped into the valid pixel range, so any UV input yields an
/// in-bounds pixel.
pub fn texel_offset(u: f32, v: f32, frame: &VideoFrame) -> usize {
    let x = pixel_coord(u, frame.width);
    let y = pixel_coord(v, frame.height);
    x * frame.bytes_per_pixel as usize + y * frame.stride_bytes as usize
}

/// Scale-round-clamp one normalized coordinate into `[0, dimension-1]`.
pub fn pixel_coord(normalized: f32, dimension: u32) -> usize {
    let scaled = (normalized * dimension as f32 + 0.5) as i64;
    scaled.clamp(0, dimension as i64 - 1) as usize
}

/// Read one RGB texel.
///
/// The colour reference may be the infrared fallback (one byte per pixel);
/// texels narrower than three bytes replicate their first byte across the
/// channels instead of reading past the pixel.
fn texel_color(frame: &VideoFrame, index: usize) -> [u8; 3] {
    let data = &frame.data;
    if frame.bytes_per_pixel >= 3 {
        [data[index], data[index + 1], data[index + 2]]
    } else {
        let value = data[index];
        [value, value, value]
    }
}

fn ensure_payload(frame: &VideoFrame, stream: &str) -> Result<(), CaptureError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CaptureError::malformed_frame(
            stream,
            format!("zero-sized frame ({}x{})", frame.width, frame.height),
        ));
    }
    if frame.stride_bytes < frame.width * frame.bytes_per_pixel {
        return Err(CaptureError::malformed_frame(
            stream,
            format!(
                "stride {} bytes narrower than a {}-pixel row of {} bytes each",
                frame.stride_bytes, frame.width, frame.bytes_per_pixel
            ),
        ));
    }
    let expected = frame.expected_len();
    if frame.data.len() < expected {
        return Err(CaptureError::malformed_frame(
            stream,
            format!("payload {} bytes, geometry implies {}", frame.data.len(), expected),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    /// Color frame where every pixel encodes its own coordinates: (x, y, 200).
    fn coded_color(width: u32, height: u32) -> VideoFrame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 200]);
            }
        }
        VideoFrame {
            width,
            height,
            bytes_per_pixel: 3,
            stride_bytes: width * 3,
            data: Bytes::from(data),
        }
    }

    /// Infrared frame where every pixel holds x + 10*y.
    fn coded_infrared(width: u32, height: u32) -> VideoFrame {
        let mut data = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push((x + 10 * y) as u8);
            }
        }
        VideoFrame {
            width,
            height,
            bytes_per_pixel: 1,
            stride_bytes: width,
            data: Bytes::from(data),
        }
    }

    fn depth_stub() -> VideoFrame {
        VideoFrame {
            width: 2,
            height: 2,
            bytes_per_pixel: 2,
            stride_bytes: 4,
            data: Bytes::from(vec![0u8; 8]),
        }
    }

    fn resolved<'a>(
        depth: &'a VideoFrame,
        color: &'a VideoFrame,
        infrared: &'a VideoFrame,
    ) -> ResolvedSet<'a> {
        ResolvedSet {
            depth,
            color,
            infrared,
            timestamp: 9.0,
            frame_number: 1,
        }
    }

    #[test]
    fn test_degenerate_vertices_are_dropped() {
        let depth = depth_stub();
        let color = coded_color(4, 4);
        let infrared = coded_infrared(4, 4);
        let set = resolved(&depth, &color, &infrared);

        let projection = PointProjection {
            vertices: vec![
                [0.0, 0.0, 0.0],
                [5e-7, -5e-7, 5e-7],
                [0.0, 0.0, 0.5],
                [1.0, 2.0, 3.0],
            ],
            uv: vec![[0.0, 0.0]; 4],
        };
        let batch = sample_points(&set, &projection).unwrap();
        assert_eq!(batch.len(), 2);
        // One axis above epsilon keeps the vertex
        assert_eq!(batch[0].position, [0.0, -0.0, -0.5]);
    }

    #[test]
    fn test_y_and_z_are_negated() {
        let depth = depth_stub();
        let color = coded_color(4, 4);
        let infrared = coded_infrared(4, 4);
        let set = resolved(&depth, &color, &infrared);

        let projection = PointProjection {
            vertices: vec![[1.5, 2.5, -3.5]],
            uv: vec![[0.5, 0.5]],
        };
        let batch = sample_points(&set, &projection).unwrap();
        assert_eq!(batch[0].position, [1.5, -2.5, 3.5]);
    }

    #[test]
    fn test_texture_sampled_per_stream_geometry() {
        let depth = depth_stub();
        let color = coded_color(8, 8);
        let infrared = coded_infrared(4, 4);
        let set = resolved(&depth, &color, &infrared);

        // uv (0.5, 0.25): color pixel (4, 2) of 8x8, infrared pixel (2, 1) of 4x4
        let projection = PointProjection {
            vertices: vec![[1.0, 1.0, 1.0]],
            uv: vec![[0.5, 0.25]],
        };
        let batch = sample_points(&set, &projection).unwrap();
        assert_eq!(batch[0].color, [4, 2, 200]);
        assert_eq!(batch[0].infrared, 2 + 10);
    }

    #[test]
    fn test_color_reference_may_be_single_byte_infrared() {
        let depth = depth_stub();
        let infrared = coded_infrared(4, 4);
        // Colour stream absent: both texture references resolve to infrared
        let set = ResolvedSet {
            depth: &depth,
            color: &infrared,
            infrared: &infrared,
            timestamp: 9.0,
            frame_number: 1,
        };

        // Bottom-right pixel-center UV, the widest offset a projector emits
        let projection = PointProjection {
            vertices: vec![[1.0, 1.0, 1.0]],
            uv: vec![[0.875, 0.875]],
        };
        let batch = sample_points(&set, &projection).unwrap();
        // Pixel (3, 3) holds 3 + 10*3; intensity replicated across channels
        assert_eq!(batch[0].color, [33, 33, 33]);
        assert_eq!(batch[0].infrared, 33);
    }

    #[test]
    fn test_undersized_stride_is_fatal() {
        let depth = depth_stub();
        let mut color = coded_color(4, 4);
        color.stride_bytes = 8;
        let infrared = coded_infrared(4, 4);
        let set = resolved(&depth, &color, &infrared);

        let projection = PointProjection {
            vertices: vec![[1.0, 1.0, 1.0]],
            uv: vec![[1.0, 1.0]],
        };
        let err = sample_points(&set, &projection).unwrap_err();
        assert!(matches!(err, CaptureError::MalformedFrame { .. }));
    }

    #[test]
    fn test_pixel_coord_bounded_for_unit_interval() {
        for dimension in [1u32, 3, 17, 640] {
            for step in 0..=100 {
                let normalized = step as f32 / 100.0;
                let px = pixel_coord(normalized, dimension);
                assert!(px < dimension as usize, "uv {normalized} dim {dimension} -> {px}");
            }
        }
    }

    #[test]
    fn test_pixel_coord_clamps_out_of_range_input() {
        assert_eq!(pixel_coord(-0.3, 16), 0);
        assert_eq!(pixel_coord(1.7, 16), 15);
    }

    #[test]
    fn test_pixel_coord_rounds_to_nearest() {
        // 0.3 * 10 + 0.5 = 3.5 -> 3 (truncation after +0.5)
        assert_eq!(pixel_coord(0.3, 10), 3);
        assert_eq!(pixel_coord(0.36, 10), 4);
    }

    #[test]
    fn test_projection_length_mismatch_is_fatal() {
        let depth = depth_stub();
        let color = coded_color(4, 4);
        let infrared = coded_infrared(4, 4);
        let set = resolved(&depth, &color, &infrared);

        let projection = PointProjection {
            vertices: vec![[1.0, 1.0, 1.0]],
            uv: vec![],
        };
        let err = sample_points(&set, &projection).unwrap_err();
        assert!(matches!(err, CaptureError::ProjectionMismatch { .. }));
    }

    #[test]
    fn test_short_payload_is_fatal() {
        let depth = depth_stub();
        let mut color = coded_color(4, 4);
        color.data = color.data.slice(0..10);
        let infrared = coded_infrared(4, 4);
        let set = resolved(&depth, &color, &infrared);

        let projection = PointProjection {
            vertices: vec![[1.0, 1.0, 1.0]],
            uv: vec![[0.0, 0.0]],
        };
        let err = sample_points(&set, &projection).unwrap_err();
        assert!(matches!(err, CaptureError::MalformedFrame { .. }));
    }
}
