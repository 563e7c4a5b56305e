use std::convert::Infallible;

use glam::Vec2;
use ::noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::cellular::CellularSampler;
use super::feature::{
    FeatureKind, FeatureShaping, TerrainFeature, sharpen_peaks, terrace_min, terrace_round,
};
use super::params::{NoiseBackend, NoiseParameters, NormalizeMode};
use crate::cancel::CancelToken;
use crate::error::TerrainError;
use crate::field::ScalarField;

/// Half-width of the range each octave offset is drawn from.
const OCTAVE_OFFSET_RANGE: i32 = 100_000;

/// Multi-octave noise sampler over a rectangular grid.
pub struct NoiseField;

enum Sampler {
    Coherent(Perlin),
    Cellular(CellularSampler),
}

impl NoiseField {
    /// Generate a `width × height` field normalized per `normalize`.
    ///
    /// The same `(width, height, seed, offset, params, normalize, features)`
    /// always yields the same field.
    pub fn generate(
        width: usize,
        height: usize,
        seed: u64,
        offset: Vec2,
        params: &NoiseParameters,
        normalize: NormalizeMode,
        features: Option<(&[TerrainFeature], FeatureShaping)>,
    ) -> ScalarField {
        let unchecked = Self::build(
            width,
            height,
            seed,
            offset,
            params,
            normalize,
            features,
            || Ok::<(), Infallible>(()),
        );
        match unchecked {
            Ok(field) => field,
            Err(never) => match never {},
        }
    }

    /// Like [`NoiseField::generate`], but checks `cancel` before every row.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_with_cancel(
        width: usize,
        height: usize,
        seed: u64,
        offset: Vec2,
        params: &NoiseParameters,
        normalize: NormalizeMode,
        features: Option<(&[TerrainFeature], FeatureShaping)>,
        cancel: &CancelToken,
    ) -> Result<ScalarField, TerrainError> {
        Self::build(
            width,
            height,
            seed,
            offset,
            params,
            normalize,
            features,
            || {
                if cancel.is_cancelled() {
                    Err(TerrainError::Cancelled)
                } else {
                    Ok(())
                }
            },
        )
    }

    /// Shared generator; `before_row` runs ahead of every row and aborts the
    /// scan with its error.
    #[allow(clippy::too_many_arguments)]
    fn build<E>(
        width: usize,
        height: usize,
        seed: u64,
        offset: Vec2,
        params: &NoiseParameters,
        normalize: NormalizeMode,
        features: Option<(&[TerrainFeature], FeatureShaping)>,
        before_row: impl Fn() -> Result<(), E>,
    ) -> Result<ScalarField, E> {
        let start = std::time::Instant::now();
        let params = params.sanitized();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut octave_offsets = Vec::with_capacity(params.octaves as usize);
        let mut max_possible_height = 0.0_f64;
        let mut amplitude = 1.0_f64;
        for _ in 0..params.octaves {
            let ox = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE) as f64
                + f64::from(offset.x);
            let oy = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE) as f64
                - f64::from(offset.y);
            octave_offsets.push((ox, oy));
            max_possible_height += amplitude;
            amplitude *= f64::from(params.persistence);
        }

        let sampler = match params.backend {
            NoiseBackend::Coherent => Sampler::Coherent(Perlin::new(seed as u32)),
            NoiseBackend::Cellular => {
                // FastNoiseLite bounds its fractal sum itself.
                max_possible_height = 1.0;
                Sampler::Cellular(CellularSampler::new(&params, seed))
            }
        };

        let scale = f64::from(params.scale);
        let half_width = width as f64 / 2.0;
        let half_height = height as f64 / 2.0;
        let mut raw = Vec::with_capacity(width * height);
        let mut min = f64::MAX;
        let mut max = f64::MIN;

        for y in 0..height {
            before_row()?;
            for x in 0..width {
                let px = x as f64 - half_width;
                let py = y as f64 - half_height;
                let value = match &sampler {
                    Sampler::Coherent(perlin) => {
                        let mut amplitude = 1.0;
                        let mut frequency = f64::from(params.frequency);
                        let mut total = 0.0;
                        for &(ox, oy) in &octave_offsets {
                            let sx = (px + ox) / scale * frequency;
                            let sy = (py + oy) / scale * frequency;
                            let sample = (perlin.get([sx, sy]) * 0.5 + 0.5).clamp(0.0, 1.0);
                            let sample = shape(sample, features, Terracing::Min);
                            total += (sample * 2.0 - 1.0) * amplitude;
                            amplitude *= f64::from(params.persistence);
                            frequency *= f64::from(params.lacunarity);
                        }
                        total
                    }
                    Sampler::Cellular(cellular) => {
                        let (ox, oy) = octave_offsets[0];
                        let frequency = f64::from(params.frequency);
                        let sx = (px + ox) / scale * frequency;
                        let sy = (py + oy) / scale * frequency;
                        let sample = shape(cellular.sample(sx, sy), features, Terracing::Round);
                        sample * 2.0 - 1.0
                    }
                };
                min = min.min(value);
                max = max.max(value);
                raw.push(value);
            }
        }

        let values = match normalize {
            NormalizeMode::Local => {
                let range = max - min;
                raw.iter()
                    .map(|&v| if range > 0.0 { ((v - min) / range) as f32 } else { 0.0 })
                    .collect()
            }
            NormalizeMode::Global { factor } => {
                let divisor = 2.0 * max_possible_height / f64::from(factor.max(f32::EPSILON));
                raw.iter()
                    .map(|&v| ((v + 1.0) / divisor).max(0.0) as f32)
                    .collect()
            }
        };

        tracing::debug!(
            "Generated {width}x{height} noise field (seed {seed}, {} octaves) in {:.2}ms",
            params.octaves,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(ScalarField::from_row_scan(width, height, values))
    }
}

#[derive(Clone, Copy)]
enum Terracing {
    Min,
    Round,
}

fn shape(
    sample: f64,
    features: Option<(&[TerrainFeature], FeatureShaping)>,
    terracing: Terracing,
) -> f64 {
    let Some((features, shaping)) = features else {
        return sample;
    };
    let mut shaped = sample;
    for feature in features.iter().filter(|f| f.applies_to(sample)) {
        shaped = match feature.kind {
            FeatureKind::Terraces => {
                let width = f64::from(shaping.terrace_width);
                match terracing {
                    Terracing::Min => terrace_min(shaped, width),
                    Terracing::Round => terrace_round(shaped, width),
                }
            }
            FeatureKind::RidgedNoise => sharpen_peaks(shaped, f64::from(shaping.peak_strength)),
            _ => shaped,
        };
    }
    shaped
}

/// Distance-from-centre gradient used as the lateral (equator/pole) heat
/// component. Row `size - z - 1` holds `|z + offset - center_point| / max_distance`.
pub fn generate_lateral_field(
    size: usize,
    center_point: f32,
    max_distance: f32,
    offset: f32,
) -> ScalarField {
    let max_distance = max_distance.abs().max(f32::EPSILON);
    let mut field = ScalarField::new(size, size);
    for z in 0..size {
        let value = ((z as f32 + offset) - center_point).abs() / max_distance;
        let row = size - z - 1;
        for x in 0..size {
            field.set(x, row, value);
        }
    }
    field
}
