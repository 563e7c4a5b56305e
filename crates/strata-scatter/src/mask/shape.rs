use glam::Vec2;
use serde::{Deserialize, Serialize};
use strata_terrain::noise::{NoiseField, NoiseParameters, NormalizeMode};
use strata_terrain::{FalloffSettings, falloff_map, falloff_value};

use super::buffer::MaskBuffer;
use super::raster::{draw_polygon, fill_circle, fill_rect, flood_fill};
use crate::filter::Rect;

/// Octave settings for the density-cloud mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityCloudSettings {
    pub seed: u64,
    pub offset: Vec2,
    pub octaves: u32,
    pub scale: f32,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl Default for DensityCloudSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            offset: Vec2::ZERO,
            octaves: 4,
            scale: 25.0,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Procedural grayscale mask shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MaskShape {
    /// Radial gradient, bright at the centre.
    LinearCircle { falloff: f32 },
    SolidCircle { radius: u32 },
    SolidRectangle { rect: Rect },
    SolidTriangle,
    SolidDiamond,
    /// Gradient along y.
    HorizontalLinear { falloff: f32 },
    /// Gradient along x.
    VerticalLinear { falloff: f32 },
    Checkerboard { block_size: u32 },
    CircleGrid { diameter: u32, spacing: u32 },
    /// Circles on a triangular lattice.
    CircleTriangleGrid { diameter: u32, spacing: u32 },
    DensityCloud(DensityCloudSettings),
    /// Square island falloff.
    RectangularFalloff { strength: f32, fade: f32 },
}

impl MaskShape {
    /// Render the shape at `width × height`. `inverse_colors` swaps black
    /// and white; `rotation` (degrees) turns the result about its centre.
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        inverse_colors: bool,
        rotation: Option<f32>,
    ) -> MaskBuffer {
        let (fg, bg) = if inverse_colors { (0.0, 1.0) } else { (1.0, 0.0) };
        let (w, h) = (width as i64, height as i64);
        let mut mask = MaskBuffer::filled(width, height, bg);
        if width == 0 || height == 0 {
            return mask;
        }

        match self {
            MaskShape::LinearCircle { falloff } => {
                let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
                for y in 0..height {
                    for x in 0..width {
                        let distance = center.distance(Vec2::new(x as f32, y as f32));
                        let v = ((0.5 - distance / width as f32) * falloff).clamp(0.0, 1.0);
                        mask.set(x, y, shade(v, inverse_colors));
                    }
                }
            }
            MaskShape::SolidCircle { radius } => {
                fill_circle(&mut mask, w / 2, h / 2, i64::from(*radius), fg);
            }
            MaskShape::SolidRectangle { rect } => {
                fill_rect(
                    &mut mask,
                    rect.x as i64,
                    rect.y as i64,
                    rect.width as i64,
                    rect.height as i64,
                    fg,
                );
            }
            MaskShape::SolidTriangle => {
                let (right, top) = (w - 1, h - 1);
                draw_polygon(&mut mask, &[(w / 2, top), (0, 0), (right, 0)], fg);
                flood_fill(&mut mask, (w / 2, h / 2), fg, fg);
            }
            MaskShape::SolidDiamond => {
                let (right, top) = (w - 1, h - 1);
                let (cx, cy) = (w / 2, h / 2);
                draw_polygon(&mut mask, &[(cx, top), (0, cy), (cx, 0), (right, cy)], fg);
                flood_fill(&mut mask, (cx, cy), fg, fg);
            }
            MaskShape::HorizontalLinear { falloff } => {
                for y in 0..height {
                    let v = (y as f32 / height as f32 * falloff).clamp(0.0, 1.0);
                    for x in 0..width {
                        mask.set(x, y, shade(v, inverse_colors));
                    }
                }
            }
            MaskShape::VerticalLinear { falloff } => {
                for x in 0..width {
                    let v = (x as f32 / width as f32 * falloff).clamp(0.0, 1.0);
                    for y in 0..height {
                        mask.set(x, y, shade(v, inverse_colors));
                    }
                }
            }
            MaskShape::Checkerboard { block_size } => {
                let block = (*block_size).max(2) as usize;
                for y in 0..height {
                    for x in 0..width {
                        let odd = (x / block + y / block) % 2 == 1;
                        mask.set(x, y, if odd { fg } else { bg });
                    }
                }
            }
            MaskShape::CircleGrid { diameter, spacing } => {
                let d = i64::from((*diameter).max(2));
                let s = i64::from(*spacing);
                let r = d / 2;
                let mut y = r + s;
                loop {
                    let mut x = r + s;
                    loop {
                        fill_circle(&mut mask, x, y, r, fg);
                        x += d + s;
                        if x + r + s > w {
                            break;
                        }
                    }
                    y += d + s;
                    if y + r + s > h {
                        break;
                    }
                }
            }
            MaskShape::CircleTriangleGrid { diameter, spacing } => {
                let d = i64::from((*diameter).max(2));
                let s = i64::from(*spacing);
                let r = d / 2;
                let pitch = (d + s) as f64;
                let row_step = ((pitch * pitch * 0.75).sqrt().floor() as i64).max(1);
                let shifted_start = (d as f64 + 1.5 * s as f64).floor() as i64;
                let mut y = r + s;
                let mut shifted = false;
                loop {
                    let mut x = if shifted { shifted_start } else { r + s };
                    while x + r <= w - s {
                        fill_circle(&mut mask, x, y, r, fg);
                        x += d + s;
                    }
                    y += row_step;
                    shifted = !shifted;
                    if y + r > h - s {
                        break;
                    }
                }
            }
            MaskShape::DensityCloud(settings) => {
                let params = NoiseParameters {
                    scale: settings.scale,
                    octaves: settings.octaves,
                    persistence: settings.persistence,
                    lacunarity: settings.lacunarity,
                    ..Default::default()
                };
                let field = NoiseField::generate(
                    width,
                    height,
                    settings.seed,
                    settings.offset,
                    &params,
                    NormalizeMode::Local,
                    None,
                );
                for (i, &v) in field.values().iter().enumerate() {
                    mask.set(i % width, i / width, shade(v, inverse_colors));
                }
            }
            MaskShape::RectangularFalloff { strength, fade } => {
                for y in 0..height {
                    for x in 0..width {
                        let fx = x as f32 / width as f32 * 2.0 - 1.0;
                        let fy = y as f32 / height as f32 * 2.0 - 1.0;
                        let v = falloff_value(fx.abs().max(fy.abs()), *strength, *fade);
                        mask.set(x, y, shade(v, inverse_colors));
                    }
                }
            }
        }

        match rotation {
            Some(degrees) if degrees % 360.0 != 0.0 => mask.rotated(degrees, bg),
            _ => mask,
        }
    }

    /// Island falloff map, identical to the one the terrain classifier uses.
    pub fn falloff_map(size: usize, strength: f32, fade: f32) -> MaskBuffer {
        let field = falloff_map(size, size, FalloffSettings { strength, fade });
        MaskBuffer::from_pixels(size, size, field.into_values())
            .unwrap_or_else(|_| MaskBuffer::new(size, size))
    }
}

fn shade(v: f32, inverse: bool) -> f32 {
    if inverse { 1.0 - v } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_circle_centre_and_corner() {
        let mask = MaskShape::SolidCircle { radius: 20 }.generate(64, 64, false, None);
        assert_eq!(mask.get(32, 32), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);

        let inverted = MaskShape::SolidCircle { radius: 20 }.generate(64, 64, true, None);
        assert_eq!(inverted.get(32, 32), 0.0);
        assert_eq!(inverted.get(0, 0), 1.0);
    }

    #[test]
    fn test_solid_rectangle() {
        let rect = Rect::new(4.0, 4.0, 8.0, 8.0);
        let mask = MaskShape::SolidRectangle { rect }.generate(20, 20, false, None);
        assert_eq!(mask.get(4, 4), 1.0);
        assert_eq!(mask.get(11, 11), 1.0);
        assert_eq!(mask.get(12, 12), 0.0);
    }

    #[test]
    fn test_triangle_and_diamond_fill_their_interior() {
        let triangle = MaskShape::SolidTriangle.generate(33, 33, false, None);
        assert_eq!(triangle.get(16, 16), 1.0);
        assert_eq!(triangle.get(16, 1), 1.0);
        assert_eq!(triangle.get(1, 31), 0.0);

        let diamond = MaskShape::SolidDiamond.generate(33, 33, false, None);
        assert_eq!(diamond.get(16, 16), 1.0);
        assert_eq!(diamond.get(0, 0), 0.0);
        assert_eq!(diamond.get(32, 32), 0.0);
    }

    #[test]
    fn test_checkerboard_parity() {
        let mask = MaskShape::Checkerboard { block_size: 4 }.generate(16, 16, false, None);
        assert_eq!(mask.get(0, 0), 0.0);
        assert_eq!(mask.get(4, 0), 1.0);
        assert_eq!(mask.get(4, 4), 0.0);

        // Block sizes below two are clamped.
        let tiny = MaskShape::Checkerboard { block_size: 0 }.generate(4, 4, false, None);
        assert_eq!(tiny.get(1, 0), 0.0);
        assert_eq!(tiny.get(2, 0), 1.0);
    }

    #[test]
    fn test_linear_gradients() {
        let horizontal = MaskShape::HorizontalLinear { falloff: 1.0 }.generate(8, 10, false, None);
        assert_eq!(horizontal.get(3, 0), 0.0);
        assert!(horizontal.get(3, 9) > horizontal.get(3, 5));

        let vertical = MaskShape::VerticalLinear { falloff: 1.0 }.generate(10, 8, true, None);
        assert_eq!(vertical.get(0, 3), 1.0);
        assert!(vertical.get(9, 3) < vertical.get(5, 3));
    }

    #[test]
    fn test_linear_circle_is_brightest_at_centre() {
        let mask = MaskShape::LinearCircle { falloff: 2.0 }.generate(32, 32, false, None);
        assert!(mask.get(16, 16) > mask.get(4, 16));
        assert_eq!(mask.get(0, 0), 0.0);
    }

    #[test]
    fn test_circle_grids_place_circles() {
        let grid = MaskShape::CircleGrid {
            diameter: 6,
            spacing: 2,
        }
        .generate(40, 40, false, None);
        // First circle centre sits at radius + spacing.
        assert_eq!(grid.get(5, 5), 1.0);
        assert_eq!(grid.get(0, 0), 0.0);

        let triangle = MaskShape::CircleTriangleGrid {
            diameter: 6,
            spacing: 2,
        }
        .generate(40, 40, false, None);
        assert_eq!(triangle.get(5, 5), 1.0);
        assert!(triangle.pixels().iter().any(|&p| p == 0.0));
    }

    #[test]
    fn test_density_cloud_is_normalized_and_deterministic() {
        let shape = MaskShape::DensityCloud(DensityCloudSettings {
            seed: 12,
            ..Default::default()
        });
        let a = shape.generate(32, 32, false, None);
        let b = shape.generate(32, 32, false, None);
        assert_eq!(a, b);
        assert!(a.pixels().iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_rectangular_falloff_matches_terrain_falloff() {
        let shape = MaskShape::RectangularFalloff {
            strength: 3.0,
            fade: 2.2,
        };
        let generated = shape.generate(21, 21, false, None);
        let shared = MaskShape::falloff_map(21, 3.0, 2.2);
        assert_eq!(generated, shared);
        assert!(generated.get(10, 10) < generated.get(0, 10));
    }

    #[test]
    fn test_rotation_fills_background() {
        let mask = MaskShape::SolidRectangle {
            rect: Rect::new(0.0, 0.0, 20.0, 20.0),
        }
        .generate(20, 20, false, Some(45.0));
        assert_eq!(mask.get(10, 10), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
    }
}
