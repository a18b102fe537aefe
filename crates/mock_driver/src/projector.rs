//! Grid projection engine
//!
//! Unprojects a depth frame into one vertex per pixel with a simplified
//! pinhole model whose optical center sits at the frame center. Texture
//! coordinates are the pixel centers normalized by the depth grid, so they
//! map onto any texture geometry downstream.

use contracts::{CaptureError, PointProjection, ProjectionEngine, VideoFrame};

/// Projection engine over a regular depth grid.
#[derive(Debug, Clone)]
pub struct GridProjector {
    /// Meters per raw depth tick
    depth_scale: f32,
}

impl GridProjector {
    /// Create a projector for the given depth unit.
    pub fn new(depth_scale: f32) -> Self {
        Self { depth_scale }
    }
}

impl ProjectionEngine for GridProjector {
    fn project(
        &self,
        depth: &VideoFrame,
        _texture: &VideoFrame,
    ) -> Result<PointProjection, CaptureError> {
        if depth.bytes_per_pixel != 2 {
            return Err(CaptureError::malformed_frame(
                "depth",
                format!("expected 2 bytes per pixel, got {}", depth.bytes_per_pixel),
            ));
        }
        if depth.data.len() < depth.expected_len() {
            return Err(CaptureError::malformed_frame(
                "depth",
                format!(
                    "payload {} bytes, geometry implies {}",
                    depth.data.len(),
                    depth.expected_len()
                ),
            ));
        }

        let pixels = (depth.width * depth.height) as usize;
        let mut vertices = Vec::with_capacity(pixels);
        let mut uv = Vec::with_capacity(pixels);

        for y in 0..depth.height {
            for x in 0..depth.width {
                let offset = (x * 2 + y * depth.stride_bytes) as usize;
                let ticks = u16::from_le_bytes([depth.data[offset], depth.data[offset + 1]]);

                let u = (x as f32 + 0.5) / depth.width as f32;
                let v = (y as f32 + 0.5) / depth.height as f32;
                uv.push([u, v]);

                if ticks == 0 {
                    // Depth hole: degenerate vertex, filtered downstream
                    vertices.push([0.0, 0.0, 0.0]);
                    continue;
                }
                let z = ticks as f32 * self.depth_scale;
                vertices.push([(u - 0.5) * z, (v - 0.5) * z, z]);
            }
        }

        Ok(PointProjection { vertices, uv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn depth(width: u32, height: u32, ticks: &[u16]) -> VideoFrame {
        let mut data = Vec::with_capacity(ticks.len() * 2);
        for t in ticks {
            data.extend_from_slice(&t.to_le_bytes());
        }
        VideoFrame {
            width,
            height,
            bytes_per_pixel: 2,
            stride_bytes: width * 2,
            data: Bytes::from(data),
        }
    }

    fn texture_stub() -> VideoFrame {
        VideoFrame {
            width: 4,
            height: 4,
            bytes_per_pixel: 3,
            stride_bytes: 12,
            data: Bytes::from(vec![0u8; 48]),
        }
    }

    #[test]
    fn test_one_vertex_per_pixel() {
        let frame = depth(2, 2, &[1000, 1000, 1000, 1000]);
        let projection = GridProjector::new(0.001).project(&frame, &texture_stub()).unwrap();
        assert_eq!(projection.len(), 4);
        assert_eq!(projection.vertices.len(), projection.uv.len());
    }

    #[test]
    fn test_depth_scale_sets_z() {
        let frame = depth(1, 1, &[2000]);
        let projection = GridProjector::new(0.001).project(&frame, &texture_stub()).unwrap();
        // Single pixel sits at the optical center: x = y = 0
        assert_eq!(projection.vertices[0], [0.0, 0.0, 2.0]);
        assert_eq!(projection.uv[0], [0.5, 0.5]);
    }

    #[test]
    fn test_depth_hole_yields_degenerate_vertex() {
        let frame = depth(2, 1, &[0, 1500]);
        let projection = GridProjector::new(0.001).project(&frame, &texture_stub()).unwrap();
        assert_eq!(projection.vertices[0], [0.0, 0.0, 0.0]);
        assert!(projection.vertices[1][2] > 0.0);
    }

    #[test]
    fn test_uv_spans_pixel_centers() {
        let frame = depth(4, 2, &[100; 8]);
        let projection = GridProjector::new(0.001).project(&frame, &texture_stub()).unwrap();
        assert_eq!(projection.uv[0], [0.125, 0.25]);
        assert_eq!(projection.uv[7], [0.875, 0.75]);
    }

    #[test]
    fn test_short_depth_payload_is_rejected() {
        let mut frame = depth(2, 2, &[100; 4]);
        frame.data = frame.data.slice(0..5);
        let err = GridProjector::new(0.001)
            .project(&frame, &texture_stub())
            .unwrap_err();
        assert!(matches!(err, CaptureError::MalformedFrame { .. }));
    }
}
