//! Error types for yolopost.

use thiserror::Error;

/// Result alias for yolopost operations.
pub type YoloPostResult<T> = std::result::Result<T, YoloPostError>;

/// Errors that can occur when decoding or suppressing detections.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum YoloPostError {
    /// The output shape cannot hold four geometry planes plus a class plane.
    #[error("invalid output shape: num_channels={num_channels}, num_elements={num_elements}")]
    InvalidShape {
        num_channels: usize,
        num_elements: usize,
    },
    /// The flat buffer length does not equal `num_channels * num_elements`.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch { expected: usize, got: usize },
    /// The label table does not cover every class plane.
    #[error("label count mismatch: model has {expected} classes, table has {got}")]
    LabelCountMismatch { expected: usize, got: usize },
    /// A candidate index lies past the last candidate position.
    #[error("element {element} out of range for {num_elements} candidates")]
    ElementOutOfRange { element: usize, num_elements: usize },
    /// Output dims were neither `[1, C, N]` nor `[C, N]`.
    #[error("unsupported output dims {dims:?}")]
    UnsupportedOutputDims { dims: Vec<usize> },
    /// A threshold is non-finite or outside `[0, 1]`.
    #[error("invalid {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    /// The label source produced no labels.
    #[error("label table is empty")]
    EmptyLabels,
    /// Reading a label file failed.
    #[error("label io error: {reason}")]
    LabelIo { reason: String },
    /// Reading a tensor file failed or its size is not a multiple of 4 bytes.
    #[error("tensor io error: {reason}")]
    TensorIo { reason: String },
}
