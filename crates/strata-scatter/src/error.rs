/// Errors from constructors that receive externally sized buffers.
#[derive(Debug, thiserror::Error)]
pub enum ScatterError {
    /// Pixel data does not match the stated dimensions, or a mask does not
    /// match the region it filters.
    #[error("mask size mismatch: expected {expected} pixels, got {actual}")]
    MaskSizeMismatch { expected: usize, actual: usize },
}
