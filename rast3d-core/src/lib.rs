/// rast3d Core Library - Transformation pipeline for a minimal rasterizer
///
/// This library provides the stateless model, view and projection matrices
/// that map object-space vertices into clip space. Matrices act on column
/// vectors and compose as `projection * view * model`.

pub mod error;
pub mod geometry;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use error::TransformError;
pub use geometry::{Mesh, Triangle};
pub use projection::{perspective_matrix, Camera};
pub use transform::{RotationState, Transform, ROTATION_STEP_DEGREES};
