//! Error types for deband-core
//!
//! Provides a unified error type for the frame and field containers.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// deband-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Row stride cannot hold one row of RGB24 pixels
    #[error("invalid stride: {stride} bytes < {min} bytes required for one row")]
    InvalidStride { stride: usize, min: usize },

    /// Backing storage shorter than the frame geometry requires
    #[error("buffer too small: {actual} bytes < {expected} bytes")]
    BufferTooSmall { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed
    #[error("memory allocation failed: {0} elements")]
    AllocationFailed(usize),
}

/// Result type alias for deband-core operations
pub type Result<T> = std::result::Result<T, Error>;
