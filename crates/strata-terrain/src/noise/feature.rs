use serde::{Deserialize, Serialize};

/// Terrain feature that may reshape raw noise samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    #[default]
    None,
    /// Sharpens peaks by raising the sample to `peak_strength`.
    RidgedNoise,
    /// Quantizes the sample into flat steps `terrace_width` apart.
    Terraces,
    Caverns,
    Valleys,
    Canyons,
    Rivers,
    Erosion,
}

/// A feature active for raw samples within `[min_threshold, max_threshold]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainFeature {
    pub kind: FeatureKind,
    pub enabled: bool,
    pub min_threshold: f32,
    pub max_threshold: f32,
}

impl Default for TerrainFeature {
    fn default() -> Self {
        Self {
            kind: FeatureKind::None,
            enabled: true,
            min_threshold: 0.0,
            max_threshold: 1.0,
        }
    }
}

impl TerrainFeature {
    pub fn new(kind: FeatureKind, min_threshold: f32, max_threshold: f32) -> Self {
        Self {
            kind,
            enabled: true,
            min_threshold,
            max_threshold,
        }
    }

    /// Thresholds are stored as f32, so the comparison happens in f32.
    pub fn applies_to(&self, sample: f64) -> bool {
        let sample = sample as f32;
        self.enabled && sample >= self.min_threshold && sample <= self.max_threshold
    }
}

/// Shared strength knobs for feature shaping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureShaping {
    pub terrace_width: f32,
    pub peak_strength: f32,
}

impl Default for FeatureShaping {
    fn default() -> Self {
        Self {
            terrace_width: 0.1,
            peak_strength: 2.0,
        }
    }
}

/// Terraces with a short ramp at the start of each step.
pub(super) fn terrace_min(height: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return height;
    }
    let step = (height / width).floor();
    let ramp = (2.0 * ((height - step * width) / width)).min(1.0);
    (step + ramp) * width
}

/// Terraces that round to the nearest step.
pub(super) fn terrace_round(height: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return height;
    }
    (height * width).round() / width
}

pub(super) fn sharpen_peaks(height: f64, strength: f64) -> f64 {
    height.max(0.0).powf(strength)
}
