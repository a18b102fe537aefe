//! Buffer export
//!
//! Drains the capture buffers to disk once ingestion has gone quiescent:
//! grouped ASCII PLY files for the point samples and a plain-text log for the
//! motion samples. Both buffer locks are taken before any byte is written and
//! held until the pass finishes, so the exported view is a single consistent
//! snapshot.

pub mod motion;
pub mod ply;

use std::fs;
use std::path::Path;

use capture::buffer::{MotionBuffer, PointBuffer};
use contracts::CaptureError;
use tracing::info;

pub use ply::PlySummary;

/// What one export pass wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Distinct point cloud files
    pub point_files: usize,
    /// Vertex lines across all point files
    pub points: usize,
    /// Motion log lines
    pub motion_samples: usize,
}

/// Export both buffers under `directory`, with the motion log at
/// `directory/motion_file`.
///
/// Creates the output directory if needed. The caller guarantees the driver
/// has stopped delivering frames; the joint locks below turn that guarantee
/// into a hard one for the duration of the pass.
pub fn export_all(
    points: &PointBuffer,
    motion: &MotionBuffer,
    directory: &Path,
    motion_file: &str,
) -> Result<ExportSummary, CaptureError> {
    fs::create_dir_all(directory)
        .map_err(|e| CaptureError::export_write(directory.display().to_string(), e.to_string()))?;

    let point_guard = points.lock_for_export();
    let motion_guard = motion.lock_for_export();

    let ply_summary = ply::write_point_clouds(&point_guard, directory)?;
    let motion_count = motion::write_motion_log(&motion_guard, &directory.join(motion_file))?;

    info!(
        point_files = ply_summary.files,
        points = ply_summary.points,
        motion_samples = motion_count,
        directory = %directory.display(),
        "export finished"
    );

    Ok(ExportSummary {
        point_files: ply_summary.files,
        points: ply_summary.points,
        motion_samples: motion_count,
    })
}
