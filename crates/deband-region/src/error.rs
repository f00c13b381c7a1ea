//! Error types for deband-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] deband_core::Error),

    /// Label field and image disagree on size
    #[error("size mismatch: labels {labels:?}, image {image:?}")]
    SizeMismatch { labels: (u32, u32), image: (u32, u32) },

    /// A label outside `1..=max_label`
    #[error("label {label} out of range 1..={max_label}")]
    LabelOutOfRange { label: u32, max_label: u32 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
