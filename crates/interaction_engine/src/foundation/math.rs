//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the plain [`Transform`] value every entity
//! carries. Rotations are authored as Euler angles in degrees, the same way
//! scene build scripts and feedback actions describe them.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local transform of an entity: position, rotation and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation as Euler angles in degrees (XYZ order)
    pub rotation: Vec3,

    /// Scale factors
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

    /// Builder pattern: set rotation (degrees)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation converted to a unit quaternion for consumers that need one
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler_angles(
            utils::deg_to_rad(self.rotation.x),
            utils::deg_to_rad(self.rotation.y),
            utils::deg_to_rad(self.rotation.z),
        )
    }

    /// Move by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

/// Math utility functions
pub mod utils {
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        let t = Transform::identity();
        assert_eq!(t.position, Vec3::zeros());
        assert_eq!(t.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(t.rotation_quat().angle(), 0.0);
    }

    #[test]
    fn test_rotation_quat_uses_degrees() {
        let t = Transform::identity().with_rotation(Vec3::new(0.0, 0.0, 90.0));
        assert_relative_eq!(t.rotation_quat().angle(), std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn test_translate() {
        let mut t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        t.translate(Vec3::new(0.0, 0.0, -100.0));
        assert_relative_eq!(t.position, Vec3::new(1.0, 2.0, -97.0));
    }
}
