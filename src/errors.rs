use thiserror::Error;

use crate::buffer::Dtype;

/// Errors that can occur while drawing a buffer
#[derive(Error, Debug)]
pub enum DrawError {
    /// Error when a buffer's dtype/channel combination is outside a
    /// drawer's declared support set
    #[error("{drawer} does not support {dtype} buffers with {channels} channel(s)")]
    UnsupportedBuffer {
        drawer: &'static str,
        dtype: Dtype,
        channels: usize,
    },

    /// Error when a shape tag string is not one of cells/pixels/ratio
    #[error("unknown shape tag: {0:?}")]
    UnknownShape(String),

    /// Error when a mode string is not a known drawing mode
    #[error("unknown drawing mode: {0:?}")]
    UnknownMode(String),

    /// Error when the compression or sixel codec collaborator fails
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Error when constructing a buffer from a sample vector of the wrong length
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

/// Result type alias for drawing operations
pub type Result<T> = std::result::Result<T, DrawError>;
