//! Math utilities and types
//!
//! Provides fundamental math types for 2D graphics and game development.

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Extension methods for [`Mat4`] used by 2D rendering
pub trait Mat4Ext {
    /// Create an orthographic projection for a 2D viewport
    ///
    /// Maps world coordinates in `(0, 0)..(width, height)` to normalized
    /// device coordinates, with the origin at the bottom-left corner and
    /// the Y axis pointing up.
    fn orthographic_2d(width: f32, height: f32) -> Mat4;

    /// Create an orthographic projection with explicit bounds
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn orthographic_2d(width: f32, height: f32) -> Mat4 {
        Self::orthographic(0.0, width, 0.0, height, -1.0, 1.0)
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, near, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orthographic_2d_maps_viewport_corners_to_ndc() {
        let projection = Mat4::orthographic_2d(800.0, 600.0);

        let origin = projection.transform_point(&nalgebra::Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(origin.x, -1.0);
        assert_relative_eq!(origin.y, -1.0);

        let far_corner = projection.transform_point(&nalgebra::Point3::new(800.0, 600.0, 0.0));
        assert_relative_eq!(far_corner.x, 1.0);
        assert_relative_eq!(far_corner.y, 1.0);
    }

    #[test]
    fn orthographic_2d_centers_the_viewport() {
        let projection = Mat4::orthographic_2d(400.0, 300.0);
        let center = projection.transform_point(&nalgebra::Point3::new(200.0, 150.0, 0.0));
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);
    }
}
