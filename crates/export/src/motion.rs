//! Plain-text motion log writer
//!
//! One line per sample, in buffer (arrival) order:
//! `<timestamp> <x> <y> <z> <kind_code>` where the kind code is 0 for
//! gyroscope and 1 for accelerometer readings.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use contracts::{CaptureError, MotionSample};
use tracing::debug;

/// Write the whole motion buffer to `path`.
///
/// An empty buffer still produces the file, so a finished run always has its
/// full output set on disk.
pub fn write_motion_log(samples: &[MotionSample], path: &Path) -> Result<usize, CaptureError> {
    let file = File::create(path)
        .map_err(|e| CaptureError::export_write(path.display().to_string(), e.to_string()))?;
    let mut writer = BufWriter::new(file);

    for sample in samples {
        let [x, y, z] = sample.vector;
        writeln!(writer, "{} {x} {y} {z} {}", sample.timestamp, sample.kind.code())
            .map_err(|e| CaptureError::export_write(path.display().to_string(), e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| CaptureError::export_write(path.display().to_string(), e.to_string()))?;

    debug!(samples = samples.len(), path = %path.display(), "motion log written");
    Ok(samples.len())
}
