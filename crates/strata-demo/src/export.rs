//! PNG previews of map layers, masks and scattered points.

use std::path::{Path, PathBuf};

use glam::Vec2;
use image::{GrayImage, RgbaImage};
use strata_scatter::MaskBuffer;
use strata_terrain::{Color, MapData, to_rgba8_bytes};

use crate::DemoError;

/// Write a row-major colour buffer as `<dir>/<name>.png`.
pub fn write_colors(
    dir: &Path,
    name: &str,
    width: usize,
    height: usize,
    colors: &[Color],
) -> Result<PathBuf, DemoError> {
    let img = RgbaImage::from_raw(width as u32, height as u32, to_rgba8_bytes(colors))
        .ok_or(DemoError::BufferSize { width, height })?;
    let path = dir.join(format!("{name}.png"));
    img.save(&path)?;
    Ok(path)
}

/// Every colour layer of a generated map.
pub fn write_map_layers(dir: &Path, data: &MapData) -> Result<Vec<PathBuf>, DemoError> {
    std::fs::create_dir_all(dir)?;
    let size = data.size;
    let layers: [(&str, &[Color]); 7] = [
        ("height", data.colors.height.as_slice()),
        ("heat", data.colors.heat.as_slice()),
        ("moisture", data.colors.moisture.as_slice()),
        ("biome", data.colors.biome.as_slice()),
        ("height_gray", data.height_grayscale.as_slice()),
        ("heat_random", data.random_heat_colors.as_slice()),
        ("heat_lateral", data.lateral_heat_colors.as_slice()),
    ];

    layers
        .into_iter()
        .map(|(name, colors)| write_colors(dir, name, size, size, colors))
        .collect()
}

pub fn write_mask(dir: &Path, name: &str, mask: &MaskBuffer) -> Result<PathBuf, DemoError> {
    std::fs::create_dir_all(dir)?;
    let img = GrayImage::from_raw(mask.width() as u32, mask.height() as u32, mask.to_gray8())
        .ok_or(DemoError::BufferSize {
            width: mask.width(),
            height: mask.height(),
        })?;
    let path = dir.join(format!("{name}.png"));
    img.save(&path)?;
    Ok(path)
}

/// Rasterize points as white pixels over the (dimmed) mask, or black.
pub fn render_points(points: &[Vec2], region_size: Vec2, mask: Option<&MaskBuffer>) -> RgbaImage {
    let width = region_size.x.ceil().max(1.0) as u32;
    let height = region_size.y.ceil().max(1.0) as u32;
    let mut img = RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255]));

    if let Some(mask) = mask {
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let value = mask.sample_clamped(x as i64, y as i64);
            let shade = (value * 96.0) as u8;
            *pixel = image::Rgba([shade, shade, shade, 255]);
        }
    }

    for point in points {
        let (x, y) = (point.x as u32, point.y as u32);
        if x < width && y < height {
            img.put_pixel(x, y, image::Rgba([255, 255, 255, 255]));
        }
    }
    img
}

/// Load any supported image as a grayscale mask.
pub fn load_mask(path: &Path) -> Result<MaskBuffer, DemoError> {
    let img = image::open(path)?.to_luma8();
    let (width, height) = img.dimensions();
    Ok(MaskBuffer::from_gray8(
        width as usize,
        height as usize,
        img.as_raw(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_colors_rejects_short_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_colors(dir.path(), "short", 4, 4, &[Color::WHITE; 3]);
        assert!(matches!(result, Err(DemoError::BufferSize { .. })));
    }

    #[test]
    fn test_mask_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut mask = MaskBuffer::new(8, 4);
        mask.set(2, 1, 1.0);
        let path = write_mask(dir.path(), "mask", &mask).unwrap();

        let loaded = load_mask(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (8, 4));
        assert_eq!(loaded.get(2, 1), 1.0);
        assert_eq!(loaded.get(0, 0), 0.0);
    }

    #[test]
    fn test_render_points_marks_pixels() {
        let points = [Vec2::new(1.5, 2.2), Vec2::new(9.0, 9.0)];
        let img = render_points(&points, Vec2::new(4.0, 4.0), None);
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(1, 2).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
