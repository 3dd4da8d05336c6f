//! Error types for cipher-eval operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cipher-eval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analyzing encrypted images.
///
/// The first three variants are input-contract violations raised by the
/// metric functions themselves. None of them is recoverable inside the
/// library; callers should abort the analysis and surface the message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Two images passed to a pairwise metric do not share one shape.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} (height, width)")]
    ShapeMismatch {
        /// Shape of the first image (height, width).
        expected: (usize, usize),
        /// Shape of the second image (height, width).
        actual: (usize, usize),
    },

    /// Correlation mode is not one of `H`, `V` or `D`.
    #[error("Invalid correlation mode: {0:?} (expected H, V or D)")]
    InvalidMode(String),

    /// An image with zero pixels was passed to a metric.
    #[error("Empty input: {metric} is undefined for an image with zero pixels")]
    EmptyInput {
        /// Name of the metric that rejected the input.
        metric: &'static str,
    },

    /// A raw buffer does not have the length its shape requires.
    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength {
        /// Required length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Failed to load an image file.
    #[error("Image load failed: {path}: {reason}")]
    ImageLoad {
        /// Path to the image that failed to load.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Error writing report files.
    #[error("Report error: {0}")]
    Report(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = Error::ShapeMismatch {
            expected: (4, 8),
            actual: (4, 7),
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch: expected (4, 8), got (4, 7) (height, width)"
        );
    }

    #[test]
    fn test_invalid_mode_message() {
        let err = Error::InvalidMode("X".to_string());
        assert!(err.to_string().contains("\"X\""));
    }
}
