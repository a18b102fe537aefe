//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::CaptureBlueprint;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_capture(args: &RunArgs) -> Result<()> {
    let mut blueprint = load_blueprint(args)?;

    // Apply CLI overrides
    if let Some(duration) = args.duration {
        info!(duration_secs = duration, "Overriding capture duration from CLI");
        blueprint.capture.duration_secs = duration;
    }
    if let Some(warmup) = args.warmup {
        info!(warmup_frames = warmup, "Overriding warm-up count from CLI");
        blueprint.capture.warmup_frames = warmup;
    }
    if let Some(ref output_dir) = args.output_dir {
        info!(output_dir = %output_dir.display(), "Overriding output directory from CLI");
        blueprint.output.directory = output_dir.clone();
    }
    config_loader::validate(&blueprint).context("Invalid configuration")?;

    info!(
        duration_secs = blueprint.capture.duration_secs,
        warmup_frames = blueprint.capture.warmup_frames,
        point_capacity = blueprint.point_capacity(),
        output_dir = %blueprint.output.directory.display(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Create the pipeline
    let pipeline = Pipeline::new(PipelineConfig { blueprint });

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting capture...");

    // Run capture with shutdown signal
    tokio::select! {
        result = pipeline.run() => {
            let stats = result.context("Capture run failed")?;
            info!(
                frame_sets = stats.ingest.frame_sets,
                points = stats.export.points,
                point_files = stats.export.point_files,
                duration_secs = stats.duration.as_secs_f64(),
                "Capture completed successfully"
            );
            stats.print_summary();
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, abandoning capture; nothing was exported");
        }
    }

    info!("Depth Capture finished");
    Ok(())
}

/// Load the blueprint from the given path, or fall back to defaults.
fn load_blueprint(args: &RunArgs) -> Result<CaptureBlueprint> {
    match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => {
            info!("No configuration file given, using defaults");
            config_loader::ConfigLoader::default_blueprint()
                .context("Failed to build default configuration")
        }
    }
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &CaptureBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Capture:");
    println!("  Duration: {}s", blueprint.capture.duration_secs);
    println!("  Warm-up frames: {}", blueprint.capture.warmup_frames);
    println!(
        "  Memory budget: {} bytes ({} point samples)",
        blueprint.capture.memory_budget_bytes,
        blueprint.point_capacity()
    );
    println!("\nDriver:");
    println!(
        "  Depth: {}x{} @ {} Hz",
        blueprint.driver.depth_width, blueprint.driver.depth_height, blueprint.driver.frame_rate_hz
    );
    println!(
        "  Color: {}x{}",
        blueprint.driver.color_width, blueprint.driver.color_height
    );
    println!("  Motion rate: {} Hz", blueprint.driver.motion_rate_hz);
    println!("  Depth scale: {} m/tick", blueprint.driver.depth_scale);
    println!("\nOutput:");
    println!("  Directory: {}", blueprint.output.directory.display());
    println!("  Motion log: {}", blueprint.output.motion_file);
    println!();
}
