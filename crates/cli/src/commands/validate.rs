//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    warmup_frames: u64,
    duration_secs: u64,
    memory_budget_bytes: u64,
    point_capacity: usize,
    output_directory: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    warmup_frames: blueprint.capture.warmup_frames,
                    duration_secs: blueprint.capture.duration_secs,
                    memory_budget_bytes: blueprint.capture.memory_budget_bytes,
                    point_capacity: blueprint.point_capacity(),
                    output_directory: blueprint.output.directory.display().to_string(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &contracts::CaptureBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.capture.warmup_frames == 0 {
        warnings.push(
            "warmup_frames is 0 - early frames may carry unstable auto-exposure".to_string(),
        );
    }

    // A buffer smaller than one frame set never admits any points
    let frame_vertices = (blueprint.driver.depth_width * blueprint.driver.depth_height) as usize;
    if blueprint.point_capacity() < frame_vertices {
        warnings.push(format!(
            "point buffer holds {} samples but one frame set projects {} vertices - \
             no frame set will ever be admitted",
            blueprint.point_capacity(),
            frame_vertices
        ));
    }

    if blueprint.output.directory.exists() && !blueprint.output.directory.is_dir() {
        warnings.push(format!(
            "output path '{}' exists and is not a directory",
            blueprint.output.directory.display()
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("OK  Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Warm-up frames: {}", summary.warmup_frames);
            println!("  Duration: {}s", summary.duration_secs);
            println!(
                "  Memory budget: {} bytes ({} point samples)",
                summary.memory_budget_bytes, summary.point_capacity
            );
            println!("  Output directory: {}", summary.output_directory);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\nWarnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("ERR Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
