//! Math utilities and types
//!
//! Provides the vector and matrix types used by the scene model, the
//! interaction layer and the render views.

pub use nalgebra::{Matrix4, Rotation3, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Transform representing position, rotation, and scale of a placed module
///
/// Rotation is stored as Euler angles (radians, applied roll/pitch/yaw) because
/// that is how modules carry it; interaction never reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,

    /// Euler rotation in radians
    pub rotation: Vec3,

    /// Component-wise scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and uniform scale
    pub fn from_position_uniform_scale(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale: Vec3::new(scale, scale, scale),
            ..Default::default()
        }
    }

    /// Convert to a model matrix (translation * rotation * scale)
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::new_translation(&self.position)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let p = self.to_matrix().transform_point(&nalgebra::Point3::from(point));
        p.coords
    }
}

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Clamp a value between min and max; NaN maps to `min`
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        value.max(min).min(max)
    }

    /// Clamp every component of a vector to `[min, max]`
    pub fn clamp_components(v: Vec3, min: f32, max: f32) -> Vec3 {
        v.map(|c| clamp(c, min, max))
    }

    /// Distance between two points projected onto the XZ plane
    pub fn distance_xz(a: Vec3, b: Vec3) -> f32 {
        let dx = a.x - b.x;
        let dz = a.z - b.z;
        (dx * dx + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_applies_scale_then_translation() {
        let transform = Transform {
            position: Vec3::new(4.0, 0.0, -1.0),
            rotation: Vec3::zeros(),
            scale: Vec3::new(2.0, 1.0, 0.5),
        };

        let moved = transform.transform_point(Vec3::new(1.0, 1.0, 2.0));
        assert_relative_eq!(moved, Vec3::new(6.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_identity_matrix() {
        assert_relative_eq!(Transform::identity().to_matrix(), Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_clamp_components() {
        let clamped = utils::clamp_components(Vec3::new(0.01, 2.0, 9.0), 0.1, 5.0);
        assert_relative_eq!(clamped, Vec3::new(0.1, 2.0, 5.0));
    }

    #[test]
    fn test_clamp_never_passes_nan_through() {
        assert_relative_eq!(utils::clamp(f32::NAN, 0.1, 5.0), 0.1);
        assert_relative_eq!(utils::clamp(f32::INFINITY, 0.1, 5.0), 5.0);
    }

    #[test]
    fn test_distance_xz_ignores_height() {
        let d = utils::distance_xz(Vec3::new(0.0, 100.0, 0.0), Vec3::new(3.0, -4.0, 4.0));
        assert_relative_eq!(d, 5.0);
    }
}
