//! Per-tile classification of height, heat and moisture fields.

use serde::{Deserialize, Serialize};

use super::biome::{Biome, HeatClass, HeightClass, MoistureClass, TerrainGroup, biome_for};
use super::levels::{BiomeColors, HeatLevels, HeightLevels, MoistureLevels};
use crate::curve::ResponseCurve;
use crate::error::TerrainError;
use crate::falloff::FalloffSettings;
use crate::field::ScalarField;

/// How the final heat value of a tile is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatMode {
    /// Lateral gradient × random noise, optionally minus the band's
    /// temperature offset × height.
    LateralTimesRandom { height_adjusted: bool },
    /// Random noise minus the band's temperature offset × height.
    HeightAdjustedRandom,
    /// `1 - height × random`.
    MeanHeat,
    /// Random noise as is.
    Random,
}

impl Default for HeatMode {
    fn default() -> Self {
        Self::LateralTimesRandom {
            height_adjusted: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoistureMode {
    Random,
    /// Random noise plus the band's moisture offset × height.
    #[default]
    HeightAdjusted,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub height_levels: HeightLevels,
    pub heat_levels: HeatLevels,
    pub moisture_levels: MoistureLevels,
    pub biome_colors: BiomeColors,
    pub heat_mode: HeatMode,
    pub moisture_mode: MoistureMode,
    /// Adds `curve(height) × height` to heat.
    pub heat_curve: Option<ResponseCurve>,
    /// Adds `curve(height) × height` to moisture.
    pub moisture_curve: Option<ResponseCurve>,
    /// Island falloff subtracted from height, heat and moisture.
    pub falloff: Option<FalloffSettings>,
}

/// Classified state of one map cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileRecord {
    pub x: usize,
    pub y: usize,
    pub index: usize,
    pub height_value: f32,
    pub height_class: HeightClass,
    pub heat_value: f32,
    pub heat_class: HeatClass,
    pub moisture_value: f32,
    pub moisture_class: MoistureClass,
    pub biome: Biome,
    pub group: TerrainGroup,
}

/// Output of [`TerrainClassifier::classify`]: one tile per cell plus the
/// adjusted fields the tiles were classified from.
#[derive(Clone, Debug)]
pub struct Classification {
    pub tiles: Vec<TileRecord>,
    pub height: ScalarField,
    pub heat: ScalarField,
    pub moisture: ScalarField,
}

pub struct TerrainClassifier {
    settings: ClassifierSettings,
}

impl TerrainClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Classify every cell. All fields must share the height field's shape.
    pub fn classify(
        &self,
        height: &ScalarField,
        heat_random: &ScalarField,
        heat_lateral: &ScalarField,
        moisture: &ScalarField,
        falloff: Option<&ScalarField>,
    ) -> Result<Classification, TerrainError> {
        for other in [Some(heat_random), Some(heat_lateral), Some(moisture), falloff]
            .into_iter()
            .flatten()
        {
            if !height.same_shape(other) {
                return Err(TerrainError::FieldSizeMismatch {
                    expected: height.len(),
                    actual: other.len(),
                });
            }
        }

        let settings = &self.settings;
        let width = height.width();
        let mut tiles = Vec::with_capacity(height.len());
        let mut out_height = ScalarField::new(width, height.height());
        let mut out_heat = ScalarField::new(width, height.height());
        let mut out_moisture = ScalarField::new(width, height.height());

        for index in 0..height.len() {
            let fall = falloff.map_or(0.0, |f| f.values()[index]);
            let h = if falloff.is_some() {
                (height.values()[index] - fall).clamp(0.0, 1.0)
            } else {
                height.values()[index]
            };
            let height_class = settings.height_levels.classify(h);

            let mut heat = self.heat_value(
                h,
                height_class,
                heat_random.values()[index],
                heat_lateral.values()[index],
            );
            if let Some(curve) = &settings.heat_curve {
                heat += curve.evaluate(h) * h;
            }

            let mut wetness = moisture.values()[index];
            if let Some(curve) = &settings.moisture_curve {
                wetness += curve.evaluate(h) * h;
            }
            if settings.moisture_mode == MoistureMode::HeightAdjusted {
                wetness += settings.height_levels.moisture_offset(height_class) * h;
            }

            if falloff.is_some() {
                heat = (heat - fall).clamp(0.0, 1.0);
                wetness = (wetness - fall).clamp(0.0, 1.0);
            }

            let heat_class = settings.heat_levels.classify(heat);
            let moisture_class = settings.moisture_levels.classify(wetness);

            out_height.values_mut()[index] = h;
            out_heat.values_mut()[index] = heat;
            out_moisture.values_mut()[index] = wetness;
            tiles.push(TileRecord {
                x: index % width,
                y: index / width,
                index,
                height_value: h,
                height_class,
                heat_value: heat,
                heat_class,
                moisture_value: wetness,
                moisture_class,
                biome: biome_for(moisture_class, heat_class),
                group: height_class.group(),
            });
        }

        tracing::debug!(
            "Classified {} tiles ({:?}, {:?})",
            tiles.len(),
            settings.heat_mode,
            settings.moisture_mode
        );

        Ok(Classification {
            tiles,
            height: out_height,
            heat: out_heat,
            moisture: out_moisture,
        })
    }

    fn heat_value(&self, height: f32, class: HeightClass, random: f32, lateral: f32) -> f32 {
        let offset = self.settings.height_levels.temperature_offset(class) * height;
        match self.settings.heat_mode {
            HeatMode::LateralTimesRandom { height_adjusted } => {
                let heat = lateral * random;
                if height_adjusted { heat - offset } else { heat }
            }
            HeatMode::HeightAdjustedRandom => random - offset,
            HeatMode::MeanHeat => 1.0 - height * random,
            HeatMode::Random => random,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: f32) -> ScalarField {
        ScalarField::from_values(4, 4, vec![value; 16]).unwrap()
    }

    fn classify_uniform(settings: ClassifierSettings, height: f32) -> Classification {
        TerrainClassifier::new(settings)
            .classify(
                &uniform(height),
                &uniform(0.5),
                &uniform(0.5),
                &uniform(0.5),
                None,
            )
            .unwrap()
    }

    #[test]
    fn test_low_height_is_water() {
        let result = classify_uniform(ClassifierSettings::default(), 0.15);
        for tile in &result.tiles {
            assert_eq!(tile.height_class, HeightClass::DeepWater);
            assert_eq!(tile.group, TerrainGroup::Water);
        }
    }

    #[test]
    fn test_full_height_is_snow() {
        let result = classify_uniform(ClassifierSettings::default(), 1.0);
        assert!(result.tiles.iter().all(|t| t.height_class == HeightClass::Snow));
    }

    #[test]
    fn test_biome_matches_table_for_every_tile() {
        let result = classify_uniform(ClassifierSettings::default(), 0.6);
        for tile in &result.tiles {
            assert_eq!(tile.biome, biome_for(tile.moisture_class, tile.heat_class));
        }
    }

    #[test]
    fn test_tile_coordinates_are_row_major() {
        let result = classify_uniform(ClassifierSettings::default(), 0.4);
        let tile = result.tiles[6];
        assert_eq!((tile.x, tile.y, tile.index), (2, 1, 6));
    }

    #[test]
    fn test_height_adjusted_heat_subtracts_band_offset() {
        let settings = ClassifierSettings {
            heat_mode: HeatMode::HeightAdjustedRandom,
            ..Default::default()
        };
        // Rock band (0.9 ≤ h < 1.0) carries a 0.3 temperature offset.
        let result = classify_uniform(settings, 0.95);
        let expected = 0.5 - 0.3 * 0.95;
        assert!((result.tiles[0].heat_value - expected).abs() < 1e-6);
    }

    fn lateral_heat(height_adjusted: bool, height: f32) -> f32 {
        let classifier = TerrainClassifier::new(ClassifierSettings {
            heat_mode: HeatMode::LateralTimesRandom { height_adjusted },
            ..Default::default()
        });
        let result = classifier
            .classify(
                &uniform(height),
                &uniform(0.6),
                &uniform(0.5),
                &uniform(0.5),
                None,
            )
            .unwrap();
        result.tiles[0].heat_value
    }

    #[test]
    fn test_default_heat_mode_is_height_adjusted_lateral() {
        assert_eq!(
            ClassifierSettings::default().heat_mode,
            HeatMode::LateralTimesRandom {
                height_adjusted: true
            }
        );
    }

    #[test]
    fn test_lateral_heat_subtracts_band_offset() {
        // Grass (0.7 ≤ h < 0.8) carries 0.1, rock (0.9 ≤ h < 1.0) 0.3.
        let grass = lateral_heat(true, 0.75);
        assert!((grass - (0.5 * 0.6 - 0.1 * 0.75)).abs() < 1e-6, "{grass}");
        let rock = lateral_heat(true, 0.95);
        assert!((rock - (0.5 * 0.6 - 0.3 * 0.95)).abs() < 1e-6, "{rock}");
        // No offset below the grass band.
        let sand = lateral_heat(true, 0.6);
        assert!((sand - 0.3).abs() < 1e-6, "{sand}");
    }

    #[test]
    fn test_lateral_heat_without_height_adjustment() {
        for height in [0.6, 0.75, 0.95] {
            let heat = lateral_heat(false, height);
            assert!((heat - 0.5 * 0.6).abs() < 1e-6, "{heat} at {height}");
        }
    }

    #[test]
    fn test_mean_heat_mode() {
        let settings = ClassifierSettings {
            heat_mode: HeatMode::MeanHeat,
            ..Default::default()
        };
        let result = classify_uniform(settings, 0.6);
        assert!((result.tiles[0].heat_value - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_height_adjusted_moisture_adds_band_offset() {
        // Shore (0.3 ≤ h < 0.5) carries a moisture offset of 1.
        let result = classify_uniform(ClassifierSettings::default(), 0.4);
        assert!((result.tiles[0].moisture_value - 0.9).abs() < 1e-6);

        let random = ClassifierSettings {
            moisture_mode: MoistureMode::Random,
            ..Default::default()
        };
        let result = classify_uniform(random, 0.4);
        assert!((result.tiles[0].moisture_value - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_falloff_is_subtracted_and_clamped() {
        let classifier = TerrainClassifier::new(ClassifierSettings {
            heat_mode: HeatMode::Random,
            moisture_mode: MoistureMode::Random,
            ..Default::default()
        });
        let result = classifier
            .classify(
                &uniform(0.6),
                &uniform(0.5),
                &uniform(1.0),
                &uniform(0.2),
                Some(&uniform(0.3)),
            )
            .unwrap();
        let tile = result.tiles[0];
        assert!((tile.height_value - 0.3).abs() < 1e-6);
        assert!((tile.heat_value - 0.2).abs() < 1e-6);
        assert_eq!(tile.moisture_value, 0.0);
    }

    #[test]
    fn test_heat_curve_adds_weighted_term() {
        let settings = ClassifierSettings {
            heat_mode: HeatMode::Random,
            heat_curve: Some(ResponseCurve::constant(0.5)),
            ..Default::default()
        };
        let result = classify_uniform(settings, 0.6);
        assert!((result.tiles[0].heat_value - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_mismatched_fields_are_rejected() {
        let classifier = TerrainClassifier::new(ClassifierSettings::default());
        let small = ScalarField::new(2, 2);
        let result = classifier.classify(&uniform(0.5), &small, &uniform(0.5), &uniform(0.5), None);
        assert!(matches!(
            result,
            Err(TerrainError::FieldSizeMismatch {
                expected: 16,
                actual: 4
            })
        ));
    }
}
