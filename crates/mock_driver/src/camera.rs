//! Mock depth camera
//!
//! Implements `DepthDriver`, generating synchronized frame sets and inertial
//! frames at configured rates on background threads. Data is delivered
//! through the frame callback, matching real device driver behavior.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use bytes::Bytes;
use contracts::{
    CaptureError, DepthDriver, DriverConfig, DriverFrame, FrameCallback, FrameSet, MotionFormat,
    MotionFrame, MotionStream, VideoFrame,
};
use tracing::{debug, trace};

/// Mock camera stream geometry and rates.
#[derive(Debug, Clone)]
pub struct MockCameraConfig {
    /// Depth and infrared stream width in pixels
    pub depth_width: u32,
    /// Depth and infrared stream height in pixels
    pub depth_height: u32,
    /// Color stream width in pixels
    pub color_width: u32,
    /// Color stream height in pixels
    pub color_height: u32,
    /// Frame set delivery rate (Hz)
    pub frame_rate_hz: f64,
    /// Per-stream motion delivery rate (Hz)
    pub motion_rate_hz: f64,
}

impl Default for MockCameraConfig {
    fn default() -> Self {
        Self::from_driver_config(&DriverConfig::default())
    }
}

impl MockCameraConfig {
    /// Adopt the stream geometry a blueprint's driver section declares.
    pub fn from_driver_config(config: &DriverConfig) -> Self {
        Self {
            depth_width: config.depth_width,
            depth_height: config.depth_height,
            color_width: config.color_width,
            color_height: config.color_height,
            frame_rate_hz: config.frame_rate_hz,
            motion_rate_hz: config.motion_rate_hz,
        }
    }
}

/// Mock depth camera.
///
/// `start` spawns one thread for synchronized frame sets and one for the two
/// inertial streams. `stop` joins both threads, so no callback invocation can
/// be in flight once it returns.
pub struct MockDepthCamera {
    config: MockCameraConfig,
    running: Arc<AtomicBool>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl MockDepthCamera {
    /// Create a camera with the given stream configuration.
    pub fn new(config: MockCameraConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            workers: Mutex::new(Vec::new()),
        }
    }

    /// Build one synchronized frame set.
    fn generate_frame_set(config: &MockCameraConfig, frame_number: u64, timestamp: f64) -> FrameSet {
        FrameSet {
            depth: Some(depth_frame(config.depth_width, config.depth_height, frame_number)),
            color: Some(color_frame(config.color_width, config.color_height, frame_number)),
            infrared: Some(infrared_frame(
                config.depth_width,
                config.depth_height,
                frame_number,
            )),
            timestamp,
            frame_number,
        }
    }
}

impl DepthDriver for MockDepthCamera {
    fn start(&self, callback: FrameCallback) -> Result<(), CaptureError> {
        // Idempotent: a second start on a running camera does nothing
        if self.running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if self.config.frame_rate_hz <= 0.0 || self.config.motion_rate_hz <= 0.0 {
            self.running.store(false, Ordering::SeqCst);
            return Err(CaptureError::driver_start(format!(
                "non-positive stream rate ({} Hz video, {} Hz motion)",
                self.config.frame_rate_hz, self.config.motion_rate_hz
            )));
        }

        let mut workers = lock(&self.workers);

        let config = self.config.clone();
        let running = Arc::clone(&self.running);
        let video_callback = Arc::clone(&callback);
        let video_interval = Duration::from_secs_f64(1.0 / config.frame_rate_hz);
        workers.push(thread::spawn(move || {
            let started = Instant::now();
            let mut frame_number: u64 = 0;
            debug!(rate_hz = config.frame_rate_hz, "mock video stream started");

            while running.load(Ordering::Relaxed) {
                frame_number += 1;
                let timestamp = started.elapsed().as_secs_f64() * 1_000.0;
                let set = MockDepthCamera::generate_frame_set(&config, frame_number, timestamp);
                video_callback(DriverFrame::FrameSet(set));
                trace!(frame_number, timestamp, "mock frame set sent");
                thread::sleep(video_interval);
            }
            debug!("mock video stream stopped");
        }));

        let running = Arc::clone(&self.running);
        let motion_interval = Duration::from_secs_f64(1.0 / self.config.motion_rate_hz);
        workers.push(thread::spawn(move || {
            let mut tick: u64 = 0;
            debug!("mock motion stream started");

            while running.load(Ordering::Relaxed) {
                tick += 1;
                let phase = (tick % 100) as f32 / 100.0;
                callback(DriverFrame::Motion(MotionFrame {
                    stream: MotionStream::Gyroscope,
                    format: MotionFormat::MotionXyz32F,
                    vector: [0.01 * phase, -0.02 * phase, 0.005],
                    frame_number: tick,
                }));
                callback(DriverFrame::Motion(MotionFrame {
                    stream: MotionStream::Accelerometer,
                    format: MotionFormat::MotionXyz32F,
                    vector: [0.1 * phase, 0.0, 9.81],
                    frame_number: tick,
                }));
                thread::sleep(motion_interval);
            }
            debug!("mock motion stream stopped");
        }));

        Ok(())
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        let workers = std::mem::take(&mut *lock(&self.workers));
        for worker in workers {
            // A worker panic already surfaced through the fault slot
            let _ = worker.join();
        }
        debug!("mock camera stopped");
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

/// Depth payload: little-endian u16 ticks, a diagonal gradient with no holes.
fn depth_frame(width: u32, height: u32, frame_number: u64) -> VideoFrame {
    let mut data = Vec::with_capacity((width * height * 2) as usize);
    for y in 0..height {
        for x in 0..width {
            let ticks = 600 + (x + y) as u16 % 1_200 + (frame_number % 16) as u16;
            data.extend_from_slice(&ticks.to_le_bytes());
        }
    }
    VideoFrame {
        width,
        height,
        bytes_per_pixel: 2,
        stride_bytes: width * 2,
        data: Bytes::from(data),
    }
}

/// Color payload: RGB gradient that drifts with the frame number.
fn color_frame(width: u32, height: u32, frame_number: u64) -> VideoFrame {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x % 256) as u8);
            data.push((y % 256) as u8);
            data.push((frame_number % 256) as u8);
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

/// Infrared payload: one brightness byte per depth pixel.
fn infrared_frame(width: u32, height: u32, frame_number: u64) -> VideoFrame {
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(((x + y + frame_number as u32) % 256) as u8);
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

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
