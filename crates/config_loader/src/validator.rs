//! Configuration validation
//!
//! Rules:
//! - duration_secs > 0
//! - memory_budget_bytes holds at least one point sample
//! - stream dimensions > 0
//! - frame_rate_hz / motion_rate_hz > 0 and finite
//! - depth_scale > 0 and finite
//! - output names non-empty

use std::mem;

use contracts::{CaptureBlueprint, CaptureError, PointSample};

/// Validate a CaptureBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &CaptureBlueprint) -> Result<(), CaptureError> {
    validate_capture(blueprint)?;
    validate_driver(blueprint)?;
    validate_output(blueprint)?;
    Ok(())
}

fn validate_capture(blueprint: &CaptureBlueprint) -> Result<(), CaptureError> {
    let capture = &blueprint.capture;

    if capture.duration_secs == 0 {
        return Err(CaptureError::config_validation(
            "capture.duration_secs",
            "capture window must be at least 1 second",
        ));
    }

    let sample_size = mem::size_of::<PointSample>() as u64;
    if capture.memory_budget_bytes < sample_size {
        return Err(CaptureError::config_validation(
            "capture.memory_budget_bytes",
            format!(
                "budget {} is smaller than one point sample ({} bytes)",
                capture.memory_budget_bytes, sample_size
            ),
        ));
    }

    Ok(())
}

fn validate_driver(blueprint: &CaptureBlueprint) -> Result<(), CaptureError> {
    let driver = &blueprint.driver;

    for (field, value) in [
        ("driver.depth_width", driver.depth_width),
        ("driver.depth_height", driver.depth_height),
        ("driver.color_width", driver.color_width),
        ("driver.color_height", driver.color_height),
    ] {
        if value == 0 {
            return Err(CaptureError::config_validation(
                field,
                "stream dimension must be > 0",
            ));
        }
    }

    for (field, value) in [
        ("driver.frame_rate_hz", driver.frame_rate_hz),
        ("driver.motion_rate_hz", driver.motion_rate_hz),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(CaptureError::config_validation(
                field,
                format!("rate must be finite and > 0, got {value}"),
            ));
        }
    }

    if !(driver.depth_scale.is_finite() && driver.depth_scale > 0.0) {
        return Err(CaptureError::config_validation(
            "driver.depth_scale",
            format!("depth scale must be finite and > 0, got {}", driver.depth_scale),
        ));
    }

    Ok(())
}

fn validate_output(blueprint: &CaptureBlueprint) -> Result<(), CaptureError> {
    let output = &blueprint.output;

    if output.directory.as_os_str().is_empty() {
        return Err(CaptureError::config_validation(
            "output.directory",
            "output directory cannot be empty",
        ));
    }

    if output.motion_file.is_empty() {
        return Err(CaptureError::config_validation(
            "output.motion_file",
            "motion log filename cannot be empty",
        ));
    }

    Ok(())
}
