//! RGB colors

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// (1, 1, 1)
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// (0, 0, 0)
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// (1, 0, 0)
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// (0, 1, 0)
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// (0, 0, 1)
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// (1, 1, 0)
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    /// (0, 1, 1)
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0);
    /// (1, 0, 1)
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0);

    /// Create a color from its channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }

    /// Channels as a vector, the form shaders consume
    pub const fn to_vector(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Channels as a plain array
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Color> for Vec3 {
    fn from(color: Color) -> Self {
        color.to_vector()
    }
}

impl From<Vec3> for Color {
    fn from(vector: Vec3) -> Self {
        Self::new(vector[0], vector[1], vector[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_rgb8_scales_to_unit_range() {
        let color = Color::from_rgb8(255, 0, 51);
        assert_relative_eq!(color.to_vector(), Vec3::new(1.0, 0.0, 0.2));
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::from(Vec3::new(1.0, 1.0, 1.0)), Color::WHITE);
    }
}
