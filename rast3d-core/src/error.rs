/// Errors raised while building transformation matrices
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Rotation axis is zero, non-finite, or not unit length
    #[error("Invalid rotation axis: length {length} is not 1")]
    InvalidAxis { length: f32 },

    #[error("Invalid projection parameters: {0}")]
    InvalidProjectionParameters(String),
}
