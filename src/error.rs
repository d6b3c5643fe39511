//! See [`Error`].

use thiserror::Error;

/// Error types for this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("shape mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("cannot evaluate the loss on an empty batch")]
    EmptyBatch,

    #[error("label {label} of example {index} is outside [0, {num_classes})")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        num_classes: usize,
    },

    #[error("regularization strength must be finite and non-negative, got {0}")]
    InvalidRegularization(f64),

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to access config file")]
    Io(#[from] std::io::Error),

    #[error("malformed config JSON")]
    Json(#[from] serde_json::Error),
}

/// Type alias for [`Result<T, Error>`].
pub type Result<T> = std::result::Result<T, Error>;
