//! # Integration Tests
//!
//! End-to-end coverage across the workspace crates:
//! - Contract smoke tests
//! - Deterministic ingest-to-export runs with hand-built frames
//! - Live runs against the mock camera (no hardware)

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use bytes::Bytes;
    use capture::buffer::{MotionBuffer, PointBuffer};
    use capture::session::CaptureSession;
    use capture::warmup::WarmupGate;
    use contracts::{
        DepthDriver, DriverFrame, FrameSet, MotionFormat, MotionFrame, MotionStream, VideoFrame,
    };
    use mock_driver::{GridProjector, MockCameraConfig, MockDepthCamera};
    use tempfile::tempdir;

    fn depth_2x2(ticks: u16) -> VideoFrame {
        let mut data = Vec::with_capacity(8);
        for _ in 0..4 {
            data.extend_from_slice(&ticks.to_le_bytes());
        }
        VideoFrame {
            width: 2,
            height: 2,
            bytes_per_pixel: 2,
            stride_bytes: 4,
            data: Bytes::from(data),
        }
    }

    fn color_4x4() -> VideoFrame {
        VideoFrame {
            width: 4,
            height: 4,
            bytes_per_pixel: 3,
            stride_bytes: 12,
            data: Bytes::from(vec![90u8; 48]),
        }
    }

    fn infrared_2x2() -> VideoFrame {
        VideoFrame {
            width: 2,
            height: 2,
            bytes_per_pixel: 1,
            stride_bytes: 2,
            data: Bytes::from(vec![7u8; 4]),
        }
    }

    fn frame_set(timestamp: f64, frame_number: u64) -> DriverFrame {
        DriverFrame::FrameSet(FrameSet {
            depth: Some(depth_2x2(1000)),
            color: Some(color_4x4()),
            infrared: Some(infrared_2x2()),
            timestamp,
            frame_number,
        })
    }

    fn session(warmup: u64, capacity: usize) -> Arc<CaptureSession> {
        Arc::new(CaptureSession::new(
            Arc::new(PointBuffer::new(capacity)),
            Arc::new(MotionBuffer::new()),
            WarmupGate::new(warmup),
            Arc::new(GridProjector::new(0.001)),
        ))
    }

    fn ply_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Hand-built frames through the whole pipeline: session -> buffers ->
    /// export, with interleaved timestamps landing in merged files.
    #[test]
    fn test_ingest_to_export_groups_by_timestamp() {
        let session = session(1, 1000);
        let callback = session.callback();

        // First frame set is warm-up; each admitted 2x2 set yields 4 points
        callback(frame_set(5.0, 1));
        callback(frame_set(5.0, 2));
        callback(frame_set(5.0, 3));
        callback(frame_set(7.0, 4));
        callback(frame_set(5.0, 5));
        callback(DriverFrame::Motion(MotionFrame {
            stream: MotionStream::Gyroscope,
            format: MotionFormat::MotionXyz32F,
            vector: [0.1, 0.2, 0.3],
            frame_number: 9,
        }));

        assert!(!session.is_aborted());
        assert_eq!(session.point_buffer().len(), 16);
        assert_eq!(session.motion_buffer().len(), 1);

        let dir = tempdir().unwrap();
        let summary = export::export_all(
            session.point_buffer(),
            session.motion_buffer(),
            dir.path(),
            "motion.txt",
        )
        .unwrap();
        assert_eq!(summary.point_files, 2);
        assert_eq!(summary.points, 16);
        assert_eq!(summary.motion_samples, 1);

        // The t=5 runs around the t=7 set merge into one file of 12 vertices
        let five = ply_lines(&dir.path().join("pointcloud_5.ply"));
        assert_eq!(five[0], "ply");
        assert_eq!(five[3], "element vertex 12");
        assert_eq!(five.len(), 12 + 12);

        let seven = ply_lines(&dir.path().join("pointcloud_7.ply"));
        assert_eq!(seven[3], "element vertex 4");

        let motion = std::fs::read_to_string(dir.path().join("motion.txt")).unwrap();
        assert_eq!(motion.lines().count(), 1);
        let fields: Vec<&str> = motion.lines().next().unwrap().split(' ').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0], "9");
        assert_eq!(fields[4], "0");
    }

    /// Every declared header count matches the vertex lines that follow it.
    #[test]
    fn test_ply_headers_agree_with_bodies() {
        let session = session(0, 1000);
        let callback = session.callback();
        for i in 0..6u64 {
            callback(frame_set((i % 3) as f64, i + 1));
        }

        let dir = tempdir().unwrap();
        export::export_all(
            session.point_buffer(),
            session.motion_buffer(),
            dir.path(),
            "motion.txt",
        )
        .unwrap();

        for entry in std::fs::read_dir(dir.path()).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().and_then(|e| e.to_str()) != Some("ply") {
                continue;
            }
            let lines = ply_lines(&path);
            let declared: usize = lines[3]
                .strip_prefix("element vertex ")
                .unwrap()
                .parse()
                .unwrap();
            let end_header = lines.iter().position(|l| l == "end_header").unwrap();
            assert_eq!(lines.len() - end_header - 1, declared, "{}", path.display());
        }
    }

    /// Live run against the mock camera: frames flow on driver threads, stop
    /// drains them, export reflects everything the session admitted.
    #[test]
    fn test_mock_camera_capture_and_export() {
        let session = session(2, 1_000_000);
        let camera = MockDepthCamera::new(MockCameraConfig {
            depth_width: 8,
            depth_height: 8,
            color_width: 16,
            color_height: 16,
            frame_rate_hz: 100.0,
            motion_rate_hz: 200.0,
        });

        camera.start(session.callback()).unwrap();
        thread::sleep(Duration::from_millis(300));
        camera.stop();

        assert!(!session.is_aborted(), "fault: {:?}", session.take_fault());
        let snapshot = session.metrics().snapshot();
        assert!(snapshot.frame_sets > 2);
        assert_eq!(snapshot.warmup_skipped, 2);
        assert!(session.point_buffer().len() > 0);
        assert!(session.motion_buffer().len() > 0);

        let dir = tempdir().unwrap();
        let summary = export::export_all(
            session.point_buffer(),
            session.motion_buffer(),
            dir.path(),
            "motion.txt",
        )
        .unwrap();

        assert!(summary.point_files > 0);
        assert_eq!(summary.points, session.point_buffer().len());
        assert_eq!(summary.motion_samples, session.motion_buffer().len());

        // Motion log kind codes are only ever 0 or 1
        let motion = std::fs::read_to_string(dir.path().join("motion.txt")).unwrap();
        for line in motion.lines() {
            let code = line.rsplit(' ').next().unwrap();
            assert!(code == "0" || code == "1", "bad kind code in '{line}'");
        }
    }

    /// A fatal frame aborts the run and suppresses the export entirely.
    #[test]
    fn test_fatal_fault_suppresses_export() {
        let session = session(0, 1000);
        let callback = session.callback();

        callback(frame_set(1.0, 1));
        callback(DriverFrame::Unknown {
            details: "vendor blob".to_string(),
        });
        callback(frame_set(2.0, 3));

        assert!(session.is_aborted());

        // The orchestrator exports only when no fault is stored
        let dir = tempdir().unwrap();
        match session.take_fault() {
            Some(fault) => assert!(fault.is_fatal()),
            None => {
                export::export_all(
                    session.point_buffer(),
                    session.motion_buffer(),
                    dir.path(),
                    "motion.txt",
                )
                .unwrap();
            }
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    /// Config file from disk drives the buffer capacity end to end.
    #[test]
    fn test_config_file_drives_capacity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("capture.toml");
        std::fs::write(
            &path,
            r#"
[capture]
warmup_frames = 0
duration_secs = 1
memory_budget_bytes = 4800

[output]
directory = "/tmp/out"
"#,
        )
        .unwrap();

        let blueprint = config_loader::ConfigLoader::load_from_path(&path).unwrap();
        let capacity = blueprint.point_capacity();
        assert_eq!(
            capacity,
            4800 / std::mem::size_of::<contracts::PointSample>()
        );

        let buffer = PointBuffer::new(capacity);
        assert_eq!(buffer.capacity(), capacity);
    }
}
