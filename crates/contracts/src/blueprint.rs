//! CaptureBlueprint - Config Loader output
//!
//! Describes one full capture run: warm-up policy, memory budget, capture
//! window, mock driver stream geometry, and output routing. Every field has a
//! default so the tool runs with no config file at all.

use std::mem;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::PointSample;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Full capture run blueprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Capture window and buffering policy
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Driver stream geometry and rates
    #[serde(default)]
    pub driver: DriverConfig,

    /// Output routing
    #[serde(default)]
    pub output: OutputConfig,
}

/// Capture window and buffering policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Frame sets discarded while sensor auto-exposure stabilizes
    #[serde(default = "default_warmup_frames")]
    pub warmup_frames: u64,

    /// Capture window length in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,

    /// Total memory budget for the point buffer, in bytes
    #[serde(default = "default_memory_budget")]
    pub memory_budget_bytes: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            warmup_frames: default_warmup_frames(),
            duration_secs: default_duration_secs(),
            memory_budget_bytes: default_memory_budget(),
        }
    }
}

fn default_warmup_frames() -> u64 {
    30
}

fn default_duration_secs() -> u64 {
    10
}

fn default_memory_budget() -> u64 {
    2_000_000_000 // 2 GB
}

/// Driver stream geometry and rates (consumed by the mock backend)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Depth stream width in pixels
    #[serde(default = "default_depth_width")]
    pub depth_width: u32,

    /// Depth stream height in pixels
    #[serde(default = "default_depth_height")]
    pub depth_height: u32,

    /// Color stream width in pixels
    #[serde(default = "default_color_width")]
    pub color_width: u32,

    /// Color stream height in pixels
    #[serde(default = "default_color_height")]
    pub color_height: u32,

    /// Synchronized frame set rate (Hz), must be > 0
    #[serde(default = "default_frame_rate")]
    pub frame_rate_hz: f64,

    /// Motion sample rate per inertial stream (Hz), must be > 0
    #[serde(default = "default_motion_rate")]
    pub motion_rate_hz: f64,

    /// Depth unit in meters per raw depth tick, must be > 0
    #[serde(default = "default_depth_scale")]
    pub depth_scale: f32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            depth_width: default_depth_width(),
            depth_height: default_depth_height(),
            color_width: default_color_width(),
            color_height: default_color_height(),
            frame_rate_hz: default_frame_rate(),
            motion_rate_hz: default_motion_rate(),
            depth_scale: default_depth_scale(),
        }
    }
}

fn default_depth_width() -> u32 {
    320
}

fn default_depth_height() -> u32 {
    240
}

fn default_color_width() -> u32 {
    640
}

fn default_color_height() -> u32 {
    480
}

fn default_frame_rate() -> f64 {
    30.0
}

fn default_motion_rate() -> f64 {
    200.0
}

fn default_depth_scale() -> f32 {
    0.001
}

/// Output routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the per-timestamp mesh files and the motion log
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// Motion log filename inside `directory`
    #[serde(default = "default_motion_file")]
    pub motion_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            motion_file: default_motion_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./capture_output")
}

fn default_motion_file() -> String {
    "motion.txt".to_string()
}

impl CaptureBlueprint {
    /// Point buffer capacity: memory budget divided by one sample's footprint.
    pub fn point_capacity(&self) -> usize {
        (self.capture.memory_budget_bytes / mem::size_of::<PointSample>() as u64) as usize
    }
}
