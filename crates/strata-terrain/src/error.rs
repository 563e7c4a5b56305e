//! Error type shared by the terrain generation pipeline.

use crate::noise::NoiseOutput;

/// Errors produced while generating or classifying terrain fields.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// No noise parameter layer is registered for the requested output.
    #[error("no noise parameters registered for {0:?} output")]
    MissingParameters(NoiseOutput),

    /// Two fields that must share dimensions do not.
    #[error("field size mismatch: expected {expected} values, got {actual}")]
    FieldSizeMismatch { expected: usize, actual: usize },

    /// The request was cancelled before generation finished.
    #[error("generation cancelled")]
    Cancelled,

    /// A field or mesh was requested with a zero dimension.
    #[error("invalid field dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
