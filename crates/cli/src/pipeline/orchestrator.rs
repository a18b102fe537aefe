//! Capture orchestrator - coordinates driver, session, and export.
//!
//! One run: start the driver, let the session ingest for the configured
//! window (or until a fatal fault aborts it), stop the driver, then export
//! the buffers. A fault suppresses the export entirely.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use capture::buffer::{MotionBuffer, PointBuffer};
use capture::session::CaptureSession;
use capture::warmup::WarmupGate;
use contracts::{CaptureBlueprint, DepthDriver};
use mock_driver::{GridProjector, MockCameraConfig, MockDepthCamera};
use tracing::{info, warn};

use super::CaptureStats;

/// Capture pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The capture run blueprint
    pub blueprint: CaptureBlueprint,
}

/// Main capture orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run one capture window to completion
    pub async fn run(self) -> Result<CaptureStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        let capacity = blueprint.point_capacity();
        info!(
            capacity,
            budget_bytes = blueprint.capture.memory_budget_bytes,
            "Point buffer sized from memory budget"
        );

        let points = Arc::new(PointBuffer::new(capacity));
        let motion = Arc::new(MotionBuffer::new());
        let session = Arc::new(CaptureSession::new(
            Arc::clone(&points),
            Arc::clone(&motion),
            WarmupGate::new(blueprint.capture.warmup_frames),
            Arc::new(GridProjector::new(blueprint.driver.depth_scale)),
        ));

        let camera = MockDepthCamera::new(MockCameraConfig::from_driver_config(&blueprint.driver));
        camera
            .start(session.callback())
            .context("Failed to start depth camera")?;

        info!(
            duration_secs = blueprint.capture.duration_secs,
            warmup_frames = blueprint.capture.warmup_frames,
            "Capture window open"
        );

        // Tick once per second: report fill, watch for a fatal fault
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.tick().await;
        for _ in 0..blueprint.capture.duration_secs {
            ticker.tick().await;
            session.log_fill();
            if session.is_aborted() {
                warn!("Capture aborted by a fatal ingest fault");
                break;
            }
        }

        // Synchronous stop: no callback can be in flight afterwards
        info!("Capture window closed, stopping driver");
        camera.stop();

        if let Some(fault) = session.take_fault() {
            return Err(fault).context("Capture run aborted; buffers were not exported");
        }

        let output = &blueprint.output;
        let summary = export::export_all(&points, &motion, &output.directory, &output.motion_file)
            .context("Failed to export capture buffers")?;

        Ok(CaptureStats {
            duration: start_time.elapsed(),
            ingest: session.metrics().snapshot(),
            export: summary,
            buffer_capacity: points.capacity(),
            buffer_len: points.len(),
            buffer_full: points.is_full(),
        })
    }
}
