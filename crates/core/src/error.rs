//! Error types for scattermap

use thiserror::Error;

/// Main error type for scattermap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Points/values length mismatch: {points} points vs {values} values")]
    LengthMismatch { points: usize, values: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Surface size mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    SurfaceSizeMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for scattermap operations
pub type Result<T> = std::result::Result<T, Error>;
