//! Capture run statistics.

use std::time::Duration;

use capture::metrics::MetricsSnapshot;
use export::ExportSummary;

/// Statistics from one capture run
#[derive(Debug, Clone, Default)]
pub struct CaptureStats {
    /// Total duration of the run, ingestion plus export
    pub duration: Duration,

    /// Ingestion counters at the end of the window
    pub ingest: MetricsSnapshot,

    /// What the export pass wrote
    pub export: ExportSummary,

    /// Point buffer capacity in samples
    pub buffer_capacity: usize,

    /// Point samples held when the window closed
    pub buffer_len: usize,

    /// Whether the point buffer hit its capacity during the run
    pub buffer_full: bool,
}

impl CaptureStats {
    /// Buffer occupancy as a percentage of capacity
    pub fn fill_percent(&self) -> f64 {
        if self.buffer_capacity == 0 {
            return 100.0;
        }
        (self.buffer_len as f64 / self.buffer_capacity as f64) * 100.0
    }

    /// Frame sets sampled per second of wall time
    pub fn frame_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.ingest.frame_sets as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Capture Statistics ===\n");

        println!("Ingestion");
        println!("   |- Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   |- Frame sets: {} ({:.2}/s)", self.ingest.frame_sets, self.frame_rate());
        println!("   |- Warm-up skipped: {}", self.ingest.warmup_skipped);
        println!("   |- Points buffered: {}", self.ingest.points_appended);
        println!("   |- Motion samples: {}", self.ingest.motion_samples);
        println!("   |- Ignored frames: {}", self.ingest.ignored_frames);
        println!("   `- Capacity rejections: {}", self.ingest.capacity_rejected);

        println!("\nBuffer");
        println!(
            "   |- Fill: {}/{} samples ({:.1}%)",
            self.buffer_len,
            self.buffer_capacity,
            self.fill_percent()
        );
        println!("   `- Hit capacity: {}", if self.buffer_full { "yes" } else { "no" });

        println!("\nExport");
        println!("   |- Point cloud files: {}", self.export.point_files);
        println!("   |- Points written: {}", self.export.points);
        println!("   `- Motion lines: {}", self.export.motion_samples);

        println!();
    }
}
