//! Linear RGBA colours used by the preview buffers.

use serde::{Deserialize, Serialize};

/// An RGBA colour with `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Opaque colour from float channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque colour from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Opaque grey with all channels set to `value`.
    pub const fn gray(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    /// Component-wise interpolation with `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Perceptual luminance (Rec. 601 weights).
    pub fn grayscale(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Flatten a colour buffer into RGBA8 bytes, e.g. for PNG export.
pub fn to_rgba8_bytes(colors: &[Color]) -> Vec<u8> {
    colors.iter().flat_map(|c| c.to_rgba8()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 4.0), Color::WHITE);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, -1.0), Color::BLACK);
    }

    #[test]
    fn test_grayscale_weights() {
        assert!((Color::WHITE.grayscale() - 1.0).abs() < 1e-6);
        assert!((Color::rgb(1.0, 0.0, 0.0).grayscale() - 0.299).abs() < 1e-6);
    }

    #[test]
    fn test_rgba8_quantization() {
        assert_eq!(Color::rgb8(25, 25, 150).to_rgba8(), [25, 25, 150, 255]);
        assert_eq!(to_rgba8_bytes(&[Color::BLACK, Color::WHITE]).len(), 8);
    }
}
