use serde::{Deserialize, Serialize};

use super::cellular::CellularSettings;
use crate::error::TerrainError;

/// Smallest accepted noise scale. Non-positive scales clamp to this.
pub const MIN_SCALE: f32 = 1e-4;
/// Upper bound on octave count.
pub const MAX_OCTAVES: u32 = 10;
/// Divisor applied to the theoretical maximum in global normalization.
pub const DEFAULT_GLOBAL_NORMALIZE_FACTOR: f32 = 2.25;

/// Which sampler produces the raw octave values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseBackend {
    /// Seeded Perlin noise with explicit per-octave accumulation.
    #[default]
    Coherent,
    /// FastNoiseLite with its own fractal and cellular settings.
    Cellular,
}

/// How raw accumulated heights are mapped into `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum NormalizeMode {
    /// Inverse-lerp between the observed min and max of this field.
    #[default]
    Local,
    /// Scale by the theoretical maximum so adjacent chunks line up.
    /// Not clamped above; values may exceed 1.
    Global { factor: f32 },
}

impl NormalizeMode {
    pub fn global() -> Self {
        Self::Global {
            factor: DEFAULT_GLOBAL_NORMALIZE_FACTOR,
        }
    }
}

/// Octave parameters for one noise layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParameters {
    /// Sample-space zoom; larger values stretch features.
    pub scale: f32,
    /// Number of octaves, clamped to `[1, MAX_OCTAVES]`.
    pub octaves: u32,
    /// Amplitude multiplier per octave, in `[0, 1]`.
    pub persistence: f32,
    /// Frequency multiplier per octave, at least 1.
    pub lacunarity: f32,
    /// Base frequency of the first octave.
    pub frequency: f32,
    pub backend: NoiseBackend,
    /// Only read by [`NoiseBackend::Cellular`].
    pub cellular: CellularSettings,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            frequency: 1.0,
            backend: NoiseBackend::Coherent,
            cellular: CellularSettings::default(),
        }
    }
}

impl NoiseParameters {
    /// Copy with every knob clamped into its accepted range.
    pub fn sanitized(&self) -> Self {
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            MIN_SCALE
        };
        let frequency = if self.frequency.is_finite() && self.frequency > 0.0 {
            self.frequency
        } else {
            1.0
        };
        Self {
            scale,
            octaves: self.octaves.clamp(1, MAX_OCTAVES),
            persistence: finite_or(self.persistence, 0.5).clamp(0.0, 1.0),
            lacunarity: finite_or(self.lacunarity, 2.0).max(1.0),
            frequency,
            backend: self.backend,
            cellular: self.cellular.clone(),
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// The field a noise layer feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseOutput {
    Height,
    Heat,
    Moisture,
}

/// A named, indexed noise layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    pub index: u32,
    pub name: String,
    pub output: NoiseOutput,
    /// Source layer for [`NoiseParameterSet::apply_master`].
    pub is_master: bool,
    /// Take numeric settings from the master layer.
    pub use_master: bool,
    pub params: NoiseParameters,
}

impl NoiseLayer {
    pub fn new(index: u32, name: impl Into<String>, output: NoiseOutput) -> Self {
        Self {
            index,
            name: name.into(),
            output,
            is_master: false,
            use_master: false,
            params: NoiseParameters::default(),
        }
    }
}

/// The noise layers used by one map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameterSet {
    pub layers: Vec<NoiseLayer>,
}

impl Default for NoiseParameterSet {
    fn default() -> Self {
        Self {
            layers: vec![
                NoiseLayer::new(0, "height", NoiseOutput::Height),
                NoiseLayer::new(1, "heat", NoiseOutput::Heat),
                NoiseLayer::new(2, "moisture", NoiseOutput::Moisture),
            ],
        }
    }
}

impl NoiseParameterSet {
    /// Parameters of the first layer feeding `output`.
    pub fn by_output(&self, output: NoiseOutput) -> Result<&NoiseParameters, TerrainError> {
        self.layers
            .iter()
            .find(|layer| layer.output == output)
            .map(|layer| &layer.params)
            .ok_or(TerrainError::MissingParameters(output))
    }

    pub fn by_index(&self, index: u32) -> Option<&NoiseParameters> {
        self.layers
            .iter()
            .find(|layer| layer.index == index)
            .map(|layer| &layer.params)
    }

    /// Copy the first master layer's numeric settings into every later layer
    /// flagged `use_master`. Later layers lose their master flag; each keeps
    /// its own cellular noise type.
    pub fn apply_master(&mut self) {
        let Some(master_pos) = self.layers.iter().position(|layer| layer.is_master) else {
            return;
        };
        let master = self.layers[master_pos].params.clone();
        for layer in self.layers.iter_mut().skip(master_pos + 1) {
            layer.is_master = false;
            if layer.use_master {
                let noise_type = layer.params.cellular.noise_type;
                layer.params = master.clone();
                layer.params.cellular.noise_type = noise_type;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::CellularNoiseType;

    #[test]
    fn test_sanitized_clamps_out_of_range_values() {
        let params = NoiseParameters {
            scale: -3.0,
            octaves: 0,
            persistence: 4.0,
            lacunarity: 0.2,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(params.scale, MIN_SCALE);
        assert_eq!(params.octaves, 1);
        assert_eq!(params.persistence, 1.0);
        assert_eq!(params.lacunarity, 1.0);

        let many = NoiseParameters {
            octaves: 99,
            ..Default::default()
        };
        assert_eq!(many.sanitized().octaves, MAX_OCTAVES);
    }

    #[test]
    fn test_by_output_reports_missing_layer() {
        let set = NoiseParameterSet {
            layers: vec![NoiseLayer::new(0, "height", NoiseOutput::Height)],
        };
        assert!(set.by_output(NoiseOutput::Height).is_ok());
        assert!(matches!(
            set.by_output(NoiseOutput::Moisture),
            Err(TerrainError::MissingParameters(NoiseOutput::Moisture))
        ));
        assert!(set.by_index(0).is_some());
        assert!(set.by_index(7).is_none());
    }

    #[test]
    fn test_apply_master_copies_into_flagged_later_layers() {
        let mut set = NoiseParameterSet::default();
        set.layers[0].is_master = true;
        set.layers[0].params.scale = 123.0;
        set.layers[1].use_master = true;
        set.layers[1].params.cellular.noise_type = CellularNoiseType::Value;
        set.layers[2].is_master = true;

        set.apply_master();

        assert_eq!(set.layers[1].params.scale, 123.0);
        assert_eq!(
            set.layers[1].params.cellular.noise_type,
            CellularNoiseType::Value
        );
        assert_eq!(set.layers[2].params.scale, 50.0);
        assert!(!set.layers[2].is_master);
    }
}
