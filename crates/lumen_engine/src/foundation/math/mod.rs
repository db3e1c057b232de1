//! Math library: const-generic vectors and matrices, quaternions and scalar helpers

pub mod interop;
pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use matrix::{Mat2, Mat3, Mat4, Matrix};
pub use quaternion::Quaternion;
pub use vector::{Vec2, Vec3, Vec4, Vector};

/// Mathematical constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Scalar utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn to_radians(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn to_degrees(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use approx::assert_relative_eq;

        #[test]
        fn test_angle_conversions() {
            assert_relative_eq!(to_radians(180.0), constants::PI);
            assert_relative_eq!(to_degrees(constants::HALF_PI), 90.0);
        }

        #[test]
        fn test_clamp() {
            assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
            assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
            assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        }
    }
}
