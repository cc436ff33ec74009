/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::TransformError;
use crate::transform::Transform;

/// Perspective projection from a vertical field of view (degrees).
///
/// With `t = tan(fov / 2)`:
///
/// ```text
/// | 1/(aspect*t)  0    0                      0                      |
/// | 0             1/t  0                      0                      |
/// | 0             0    (near+far)/(near-far)  -2*near*far/(near-far) |
/// | 0             0    1                      0                      |
/// ```
///
/// The last row copies view-space z into w, so x and y are divided by z
/// during the perspective divide.
pub fn perspective_matrix(
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
) -> Result<Matrix4<f32>, TransformError> {
    let invalid = |reason: String| {
        log::debug!("Rejecting projection parameters: {}", reason);
        Err(TransformError::InvalidProjectionParameters(reason))
    };

    if ![fov, aspect, near, far].iter().all(|v| v.is_finite()) {
        return invalid(format!(
            "non-finite input (fov={}, aspect={}, near={}, far={})",
            fov, aspect, near, far
        ));
    }
    if fov <= 0.0 || fov >= 180.0 {
        return invalid(format!("field of view {} must be in (0, 180) degrees", fov));
    }
    if aspect <= 0.0 {
        return invalid(format!("aspect ratio {} must be positive", aspect));
    }
    if near <= 0.0 || far <= 0.0 {
        return invalid(format!("near {} and far {} must be positive", near, far));
    }
    if near >= far {
        return invalid(format!("near {} must be closer than far {}", near, far));
    }

    let t = (fov / 2.0).to_radians().tan();
    if t <= f32::EPSILON || !t.is_finite() {
        return invalid(format!("field of view {} yields a degenerate tangent {}", fov, t));
    }

    #[rustfmt::skip]
    let projection = Matrix4::new(
        1.0 / (aspect * t), 0.0, 0.0, 0.0,
        0.0, 1.0 / t, 0.0, 0.0,
        0.0, 0.0, (near + far) / (near - far), -2.0 * near * far / (near - far),
        0.0, 0.0, 1.0, 0.0,
    );

    // Finite inputs can still overflow, e.g. huge near * far or tiny aspect
    if !projection.iter().all(|v| v.is_finite()) {
        return invalid(format!(
            "matrix overflows for fov={}, aspect={}, near={}, far={}",
            fov, aspect, near, far
        ));
    }

    Ok(projection)
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(eye: Vector3<f32>, fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            eye,
            fov,
            aspect,
            near,
            far,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Transform::view_matrix(&self.eye)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Result<Matrix4<f32>, TransformError> {
        perspective_matrix(self.fov, self.aspect, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` where depth is the normalized device z, or
    /// `None` if the point is degenerate (w near zero) or outside the
    /// viewport in x or y.
    pub fn project(
        point: &Point3<f32>,
        mvp: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        // Transform to clip space
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero w
        if clip.w.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 5.0), 45.0, 1.0, 0.1, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    fn divide(m: &Matrix4<f32>, p: Vector4<f32>) -> Vector3<f32> {
        let clip = m * p;
        clip.xyz() / clip.w
    }

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.eye, Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.fov, 45.0);
        assert_eq!(camera.aspect, 1.0);
        assert!(camera.projection_matrix().is_ok());
    }

    #[test]
    fn test_perspective_entries() {
        let m = perspective_matrix(90.0, 2.0, 1.0, 3.0).unwrap();
        #[rustfmt::skip]
        let expected = Matrix4::new(
            0.5, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, -2.0, 3.0,
            0.0, 0.0, 1.0, 0.0,
        );
        assert_relative_eq!(m, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_near_plane_frustum_edge_maps_to_unit_square() {
        let m = perspective_matrix(90.0, 1.0, 1.0, 100.0).unwrap();

        // tan(45°) = 1, so the frustum edge at distance 1 is at |x| = |y| = 1
        for (x, y) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
            let ndc = divide(&m, Vector4::new(x, y, -1.0, 1.0));
            assert_relative_eq!(ndc.x.abs(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(ndc.y.abs(), 1.0, epsilon = 1e-5);
        }

        let center = divide(&m, Vector4::new(0.0, 0.0, -1.0, 1.0));
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_depth_mapping_of_clip_distances() {
        let m = perspective_matrix(90.0, 1.0, 1.0, 100.0).unwrap();
        let near = divide(&m, Vector4::new(0.0, 0.0, 1.0, 1.0));
        let far = divide(&m, Vector4::new(0.0, 0.0, 100.0, 1.0));
        assert_relative_eq!(near.z, 1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_equal_near_far_is_rejected() {
        let result = perspective_matrix(90.0, 1.0, 1.0, 1.0);
        assert!(matches!(
            result,
            Err(TransformError::InvalidProjectionParameters(_))
        ));
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let cases = [
            (0.0, 1.0, 0.1, 50.0),
            (-10.0, 1.0, 0.1, 50.0),
            (180.0, 1.0, 0.1, 50.0),
            (45.0, 0.0, 0.1, 50.0),
            (45.0, 1.0, 0.0, 50.0),
            (45.0, 1.0, -0.1, 50.0),
            (45.0, 1.0, 50.0, 0.1),
            (45.0, 1.0, 0.1, f32::INFINITY),
            (f32::NAN, 1.0, 0.1, 50.0),
        ];
        for (fov, aspect, near, far) in cases {
            let result = perspective_matrix(fov, aspect, near, far);
            assert!(
                matches!(result, Err(TransformError::InvalidProjectionParameters(_))),
                "expected rejection for fov={} aspect={} near={} far={}",
                fov,
                aspect,
                near,
                far
            );
        }
    }

    #[test]
    fn test_valid_matrix_is_finite() {
        let m = Camera::default().projection_matrix().unwrap();
        assert!(m.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_overflowing_parameters_are_rejected() {
        for (fov, aspect, near, far) in [(45.0, 1.0, 1e20, 1e21), (45.0, 1e-40, 0.1, 50.0)] {
            let result = perspective_matrix(fov, aspect, near, far);
            assert!(
                matches!(result, Err(TransformError::InvalidProjectionParameters(_))),
                "expected rejection for fov={} aspect={} near={} far={}",
                fov,
                aspect,
                near,
                far
            );
        }
    }

    #[test]
    fn test_project_center_and_degenerate() {
        let m = perspective_matrix(90.0, 1.0, 1.0, 100.0).unwrap();

        let (x, y, _) = Camera::project(&Point3::new(0.0, 0.0, -5.0), &m, 100, 50).unwrap();
        assert_relative_eq!(x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(y, 25.0, epsilon = 1e-4);

        // w = z = 0
        assert!(Camera::project(&Point3::new(1.0, 1.0, 0.0), &m, 100, 50).is_none());
        // Outside the frustum in x
        assert!(Camera::project(&Point3::new(10.0, 0.0, -1.0), &m, 100, 50).is_none());
    }
}
