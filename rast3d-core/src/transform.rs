/// Model and view transformation matrices and rotation state
use nalgebra::{Matrix3, Matrix4, Vector3};

use crate::error::TransformError;

/// Maximum allowed deviation of a rotation axis length from 1
pub const AXIS_TOLERANCE: f32 = 1e-3;

/// Angle applied per rotation key press (in degrees)
pub const ROTATION_STEP_DEGREES: f32 = 10.0;

/// Rotation about a single axis, driven by user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    /// Current angle in degrees
    pub angle: f32,
    axis: Vector3<f32>,
}

impl RotationState {
    pub fn new(angle: f32) -> Self {
        Self {
            angle,
            axis: Vector3::z(),
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0)
    }

    pub fn axis(&self) -> Vector3<f32> {
        self.axis
    }

    /// Rotate by a delta amount (in degrees)
    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
    }

    /// Switch the rotation axis. The axis must be unit length within [`AXIS_TOLERANCE`].
    pub fn set_axis(&mut self, axis: Vector3<f32>) -> Result<(), TransformError> {
        validate_axis(&axis)?;
        self.axis = axis.normalize();
        Ok(())
    }

    /// Model matrix for the current angle and axis
    pub fn model_matrix(&self) -> Result<Matrix4<f32>, TransformError> {
        if self.axis == Vector3::z() {
            Ok(Transform::model_matrix(self.angle))
        } else {
            Transform::rotation_about_axis(&self.axis, self.angle)
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about the Z axis by `angle` degrees, counter-clockwise seen from +Z
    #[rustfmt::skip]
    pub fn model_matrix(angle: f32) -> Matrix4<f32> {
        let (sin, cos) = angle.to_radians().sin_cos();

        Matrix4::new(
            cos, -sin, 0.0, 0.0,
            sin, cos, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about a unit `axis` by `angle` degrees (Rodrigues' formula).
    ///
    /// `R = I·cosθ + (1 - cosθ)·(a⊗a) + sinθ·[a]×`, embedded in a homogeneous
    /// matrix whose last row and column are `(0, 0, 0, 1)`. Axes within
    /// [`AXIS_TOLERANCE`] of unit length are renormalized before use.
    pub fn rotation_about_axis(
        axis: &Vector3<f32>,
        angle: f32,
    ) -> Result<Matrix4<f32>, TransformError> {
        validate_axis(axis)?;
        let axis = axis.normalize();

        let (sin, cos) = angle.to_radians().sin_cos();
        let outer = axis * axis.transpose();
        let cross = axis.cross_matrix();

        let rotation: Matrix3<f32> = Matrix3::identity() * cos + outer * (1.0 - cos) + cross * sin;

        Ok(rotation.to_homogeneous())
    }

    /// Translate world space so that `eye` becomes the origin
    pub fn view_matrix(eye: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(&-eye)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

fn validate_axis(axis: &Vector3<f32>) -> Result<(), TransformError> {
    let length = axis.norm();
    if !length.is_finite() || (length - 1.0).abs() > AXIS_TOLERANCE {
        log::debug!("Rejecting rotation axis {:?} with length {}", axis, length);
        return Err(TransformError::InvalidAxis { length });
    }
    Ok(())
}
