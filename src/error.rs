//! Generator error types.

use thiserror::Error;

/// Errors surfaced by generator configuration, planning, and generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("Invalid channel count: {0} (must be > 0)")]
    InvalidChannels(usize),

    #[error("Invalid image height: {0} (must be > 0)")]
    InvalidHeight(usize),

    #[error("Invalid image width: {0} (must be > 0)")]
    InvalidWidth(usize),

    #[error("Invalid filter count: {0} (must be > 0)")]
    InvalidFilters(usize),

    #[error("Invalid latent dimension: {0} (must be > 0)")]
    InvalidLatentDim(usize),

    #[error("Invalid noise dimension: {0} (must be > 0)")]
    InvalidNoiseDim(usize),

    #[error("Invalid scale count: {0} (must be in 1..=16)")]
    InvalidScales(usize),

    #[error("Invalid fully-connected width: {0} (must be > 0)")]
    InvalidFcWidth(usize),

    #[error("Image height {height} is not divisible by 2^{scales}")]
    IndivisibleHeight { height: usize, scales: usize },

    #[error("Image width {width} is not divisible by 2^{scales}")]
    IndivisibleWidth { width: usize, scales: usize },

    #[error("Latent batch has {got} columns, expected {expected}")]
    LatentWidthMismatch { got: usize, expected: usize },

    #[error("{0} is not implemented")]
    Unsupported(&'static str),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
