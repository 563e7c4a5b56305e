//! Triangle mesh extraction from height fields.

use glam::{Vec2, Vec3};

use crate::curve::ResponseCurve;
use crate::field::ScalarField;

/// Highest accepted level of detail.
pub const MAX_LOD: u32 = 6;

/// Grid mesh with one vertex per sampled cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// Counter-clockwise index triples into `vertices`.
    pub triangles: Vec<u32>,
    /// Vertices per row.
    pub vertices_per_line: usize,
}

impl TerrainMesh {
    /// Build a mesh centred on the origin. Heights go through `curve` and
    /// are scaled by `height_multiplier`; `lod` (clamped to `0..=6`)
    /// samples every `lod * 2`-th cell.
    pub fn from_height_field(
        field: &ScalarField,
        height_multiplier: f32,
        curve: &ResponseCurve,
        lod: u32,
    ) -> Self {
        let (width, height) = (field.width(), field.height());
        if width == 0 || height == 0 {
            return Self::default();
        }

        let lod = lod.min(MAX_LOD) as usize;
        let increment = if lod == 0 { 1 } else { lod * 2 };
        let per_line = (width - 1) / increment + 1;
        let rows = (height - 1) / increment + 1;
        let top_left_x = (width as f32 - 1.0) / -2.0;
        let top_left_z = (height as f32 - 1.0) / 2.0;

        let mut mesh = TerrainMesh {
            vertices: Vec::with_capacity(per_line * rows),
            uvs: Vec::with_capacity(per_line * rows),
            triangles: Vec::with_capacity((per_line - 1) * rows.saturating_sub(1) * 6),
            vertices_per_line: per_line,
        };

        for (row, y) in (0..height).step_by(increment).enumerate() {
            for (col, x) in (0..width).step_by(increment).enumerate() {
                let elevation = curve.evaluate(field.get(x, y)) * height_multiplier;
                mesh.vertices.push(Vec3::new(
                    top_left_x + x as f32,
                    elevation,
                    top_left_z - y as f32,
                ));
                mesh.uvs
                    .push(Vec2::new(x as f32 / width as f32, y as f32 / height as f32));

                if col + 1 < per_line && row + 1 < rows {
                    let v = (row * per_line + col) as u32;
                    let below = v + per_line as u32;
                    mesh.add_triangle(v, below + 1, below);
                    mesh.add_triangle(below + 1, v, v + 1);
                }
            }
        }

        mesh
    }

    fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.extend_from_slice(&[a, b, c]);
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}
