//! Grouped ASCII PLY writer
//!
//! Buffered points are written into one file per distinct capture timestamp.
//! The writer makes two passes over the samples: the first counts vertices per
//! timestamp so each header can declare its final vertex count up front, the
//! second streams the vertex lines. Samples arrive grouped by frame set, so
//! the second pass walks runs of equal timestamps; when a timestamp that
//! already has a file shows up again later in the buffer, the file is reopened
//! for append and the runs merge.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use contracts::{CaptureError, PointSample};
use tracing::{debug, info};

/// How many point files an export pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlySummary {
    /// Distinct output files written
    pub files: usize,
    /// Vertex lines written across all files
    pub points: usize,
}

/// File name for one timestamp group, keyed by the whole-millisecond part.
///
/// Groups are distinguished by the full f64 timestamp; two groups inside the
/// same millisecond would collide on this name. Device timestamps are spaced
/// by whole frame intervals, so such collisions are out of scope here.
pub fn cloud_file_name(timestamp: f64) -> String {
    format!("pointcloud_{}.ply", timestamp as u64)
}

/// Write every sample into its timestamp group's file under `directory`.
///
/// Progress is reported at every 5% of the buffer.
pub fn write_point_clouds(
    samples: &[PointSample],
    directory: &Path,
) -> Result<PlySummary, CaptureError> {
    if samples.is_empty() {
        debug!("no point samples to export");
        return Ok(PlySummary::default());
    }

    // Pass 1: vertex count per timestamp, keyed by raw bit pattern
    let mut group_sizes: HashMap<u64, usize> = HashMap::new();
    for sample in samples {
        *group_sizes.entry(sample.group_key()).or_default() += 1;
    }
    info!(
        points = samples.len(),
        groups = group_sizes.len(),
        "writing point cloud files"
    );

    // Pass 2: stream runs of equal timestamps into their files
    let mut created: HashMap<u64, PathBuf> = HashMap::new();
    let progress_step = (samples.len() / 20).max(1);
    let mut next_progress = progress_step;
    let mut index = 0;

    while index < samples.len() {
        let key = samples[index].group_key();
        let mut end = index + 1;
        while end < samples.len() && samples[end].group_key() == key {
            end += 1;
        }
        let run = &samples[index..end];
        let timestamp = run[0].timestamp;

        let mut writer = match created.get(&key) {
            Some(path) => reopen(path)?,
            None => {
                let path = directory.join(cloud_file_name(timestamp));
                let group_size = group_sizes[&key];
                let writer = create_with_header(&path, timestamp, group_size)?;
                created.insert(key, path);
                writer
            }
        };

        for sample in run {
            write_vertex(&mut writer, sample)
                .map_err(|e| CaptureError::export_write(cloud_file_name(timestamp), e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| CaptureError::export_write(cloud_file_name(timestamp), e.to_string()))?;

        index = end;
        while index >= next_progress {
            info!(
                percent = 100 * next_progress / samples.len(),
                "export progress"
            );
            next_progress += progress_step;
        }
    }

    Ok(PlySummary {
        files: created.len(),
        points: samples.len(),
    })
}

fn create_with_header(
    path: &Path,
    timestamp: f64,
    vertex_count: usize,
) -> Result<BufWriter<File>, CaptureError> {
    let file = File::create(path)
        .map_err(|e| CaptureError::export_write(path.display().to_string(), e.to_string()))?;
    let mut writer = BufWriter::new(file);
    write_header(&mut writer, timestamp, vertex_count)
        .map_err(|e| CaptureError::export_write(path.display().to_string(), e.to_string()))?;
    Ok(writer)
}

fn reopen(path: &Path) -> Result<BufWriter<File>, CaptureError> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| CaptureError::export_write(path.display().to_string(), e.to_string()))?;
    Ok(BufWriter::new(file))
}

fn write_header(
    writer: &mut impl Write,
    timestamp: f64,
    vertex_count: usize,
) -> std::io::Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment metadata time = {timestamp}")?;
    writeln!(writer, "element vertex {vertex_count}")?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "property uchar intensity")?;
    writeln!(writer, "end_header")
}

fn write_vertex(writer: &mut impl Write, sample: &PointSample) -> std::io::Result<()> {
    let [x, y, z] = sample.position;
    let [r, g, b] = sample.color;
    writeln!(writer, "{x} {y} {z} {r} {g} {b} {}", sample.infrared)
}
