//! Layered error definitions
//!
//! Categorized by source: config / driver / frame / projection / export

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum CaptureError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Driver Errors =====
    /// Driver failed to start delivery
    #[error("driver start error: {message}")]
    DriverStart { message: String },

    // ===== Frame Errors =====
    /// Frame kind the classifier cannot interpret (driver/configuration mismatch)
    #[error("unrecognized frame type: {details}")]
    UnrecognizedFrame { details: String },

    /// Mandatory sub-stream absent from a synchronized frame set
    #[error("unable to get synchronized {stream} frame")]
    MissingStream { stream: String },

    /// Sub-frame payload inconsistent with its declared geometry
    #[error("malformed {stream} frame: {message}")]
    MalformedFrame { stream: String, message: String },

    // ===== Projection Errors =====
    /// Projection produced no vertices for a frame set
    #[error("empty projection result for frame set at t={timestamp}")]
    EmptyProjection { timestamp: f64 },

    /// Vertex and UV lists disagree in length
    #[error("projection mismatch: {vertices} vertices but {uv} texture coordinates")]
    ProjectionMismatch { vertices: usize, uv: usize },

    // ===== Export Errors =====
    /// Export write error
    #[error("export write error for '{path}': {message}")]
    ExportWrite { path: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl CaptureError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create driver start error
    pub fn driver_start(message: impl Into<String>) -> Self {
        Self::DriverStart {
            message: message.into(),
        }
    }

    /// Create unrecognized-frame error
    pub fn unrecognized_frame(details: impl Into<String>) -> Self {
        Self::UnrecognizedFrame {
            details: details.into(),
        }
    }

    /// Create missing-stream error
    pub fn missing_stream(stream: impl Into<String>) -> Self {
        Self::MissingStream {
            stream: stream.into(),
        }
    }

    /// Create malformed-frame error
    pub fn malformed_frame(stream: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedFrame {
            stream: stream.into(),
            message: message.into(),
        }
    }

    /// Create export write error
    pub fn export_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExportWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for conditions that must abort the capture run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedFrame { .. }
                | Self::MissingStream { .. }
                | Self::MalformedFrame { .. }
                | Self::EmptyProjection { .. }
                | Self::ProjectionMismatch { .. }
        )
    }
}
