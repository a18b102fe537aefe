//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    capture: CaptureInfo,
    driver: DriverInfo,
    output: OutputInfo,
}

#[derive(Serialize)]
struct CaptureInfo {
    warmup_frames: u64,
    duration_secs: u64,
    memory_budget_bytes: u64,
    point_capacity: usize,
}

#[derive(Serialize)]
struct DriverInfo {
    depth_resolution: String,
    color_resolution: String,
    frame_rate_hz: f64,
    motion_rate_hz: f64,
    depth_scale: f32,
}

#[derive(Serialize)]
struct OutputInfo {
    directory: String,
    motion_file: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let blueprint = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration info");
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => {
            info!("No configuration file given, showing defaults");
            config_loader::ConfigLoader::default_blueprint()?
        }
    };

    if args.json {
        let info = build_config_info(&blueprint);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint);
    }

    Ok(())
}

fn build_config_info(blueprint: &contracts::CaptureBlueprint) -> ConfigInfo {
    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        capture: CaptureInfo {
            warmup_frames: blueprint.capture.warmup_frames,
            duration_secs: blueprint.capture.duration_secs,
            memory_budget_bytes: blueprint.capture.memory_budget_bytes,
            point_capacity: blueprint.point_capacity(),
        },
        driver: DriverInfo {
            depth_resolution: format!(
                "{}x{}",
                blueprint.driver.depth_width, blueprint.driver.depth_height
            ),
            color_resolution: format!(
                "{}x{}",
                blueprint.driver.color_width, blueprint.driver.color_height
            ),
            frame_rate_hz: blueprint.driver.frame_rate_hz,
            motion_rate_hz: blueprint.driver.motion_rate_hz,
            depth_scale: blueprint.driver.depth_scale,
        },
        output: OutputInfo {
            directory: blueprint.output.directory.display().to_string(),
            motion_file: blueprint.output.motion_file.clone(),
        },
    }
}

fn print_config_info(blueprint: &contracts::CaptureBlueprint) {
    println!("=== Depth Capture Configuration ===\n");

    println!("Capture");
    println!("   |- Version: {:?}", blueprint.version);
    println!("   |- Warm-up frames: {}", blueprint.capture.warmup_frames);
    println!("   |- Duration: {}s", blueprint.capture.duration_secs);
    println!(
        "   `- Memory budget: {} bytes ({} point samples)",
        blueprint.capture.memory_budget_bytes,
        blueprint.point_capacity()
    );

    println!("\nDriver");
    println!(
        "   |- Depth: {}x{} @ {} Hz",
        blueprint.driver.depth_width, blueprint.driver.depth_height, blueprint.driver.frame_rate_hz
    );
    println!(
        "   |- Color: {}x{}",
        blueprint.driver.color_width, blueprint.driver.color_height
    );
    println!("   |- Motion rate: {} Hz", blueprint.driver.motion_rate_hz);
    println!("   `- Depth scale: {} m/tick", blueprint.driver.depth_scale);

    println!("\nOutput");
    println!("   |- Directory: {}", blueprint.output.directory.display());
    println!("   `- Motion log: {}", blueprint.output.motion_file);

    println!();
}
