//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Generate `CaptureBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("capture.toml")).unwrap();
//! println!("warm-up frames: {}", blueprint.capture.warmup_frames);
//! ```

mod parser;
mod validator;

pub use contracts::CaptureBlueprint;
pub use parser::ConfigFormat;
pub use validator::validate;

use contracts::CaptureError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<CaptureBlueprint, CaptureError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<CaptureBlueprint, CaptureError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Build the default blueprint (no config file), validated.
    pub fn default_blueprint() -> Result<CaptureBlueprint, CaptureError> {
        let blueprint = CaptureBlueprint::default();
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Serialize CaptureBlueprint to TOML string
    pub fn to_toml(blueprint: &CaptureBlueprint) -> Result<String, CaptureError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| CaptureError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize CaptureBlueprint to JSON string
    pub fn to_json(blueprint: &CaptureBlueprint) -> Result<String, CaptureError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| CaptureError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, CaptureError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            CaptureError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| CaptureError::config_parse(format!("unsupported config format: .{ext}")))
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, CaptureError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
[capture]
warmup_frames = 5
duration_secs = 2
memory_budget_bytes = 100000000

[driver]
depth_width = 64
depth_height = 48
color_width = 128
color_height = 96
frame_rate_hz = 30.0
motion_rate_hz = 100.0

[output]
directory = "/tmp/capture"
motion_file = "imu.txt"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.capture.warmup_frames, 5);
        assert_eq!(bp.output.motion_file, "imu.txt");
    }

    #[test]
    fn test_round_trip_toml() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(bp.capture.warmup_frames, bp2.capture.warmup_frames);
        assert_eq!(bp.driver.depth_width, bp2.driver.depth_width);
        assert_eq!(bp.output.directory, bp2.output.directory);
    }

    #[test]
    fn test_round_trip_json() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(bp.capture.memory_budget_bytes, bp2.capture.memory_budget_bytes);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        // A parsable config with an illegal value must still fail
        let content = r#"
[capture]
duration_secs = 0
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("duration_secs"));
    }

    #[test]
    fn test_default_blueprint_valid() {
        assert!(ConfigLoader::default_blueprint().is_ok());
    }
}
