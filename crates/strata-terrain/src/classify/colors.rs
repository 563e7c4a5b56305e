//! Preview colour buffers built from classified tiles.

use super::biome::{HeightClass, TerrainGroup};
use super::classifier::{ClassifierSettings, TileRecord};
use super::levels::HeatLevels;
use crate::color::Color;
use crate::field::ScalarField;

/// One colour per tile for each preview layer.
#[derive(Clone, Debug, Default)]
pub struct ColorBuffers {
    pub height: Vec<Color>,
    pub heat: Vec<Color>,
    pub moisture: Vec<Color>,
    pub biome: Vec<Color>,
}

impl ColorBuffers {
    pub fn build(tiles: &[TileRecord], settings: &ClassifierSettings) -> Self {
        let heights = &settings.height_levels;
        let mut buffers = Self {
            height: Vec::with_capacity(tiles.len()),
            heat: Vec::with_capacity(tiles.len()),
            moisture: Vec::with_capacity(tiles.len()),
            biome: Vec::with_capacity(tiles.len()),
        };
        for tile in tiles {
            buffers.height.push(heights.band(tile.height_class).color);
            buffers.heat.push(settings.heat_levels.color(tile.heat_class));
            buffers
                .moisture
                .push(settings.moisture_levels.color(tile.moisture_class));
            let biome_color = match (tile.group, tile.height_class) {
                (TerrainGroup::Water, HeightClass::DeepWater) => heights.deep_water.color,
                (TerrainGroup::Water, _) => heights.shallow_water.color,
                (TerrainGroup::Land, _) => settings.biome_colors.color(tile.biome),
            };
            buffers.biome.push(biome_color);
        }
        buffers
    }
}

/// Black-to-white ramp of a field's values.
pub fn color_from_field(field: &ScalarField) -> Vec<Color> {
    field
        .values()
        .iter()
        .map(|&v| Color::BLACK.lerp(Color::WHITE, v))
        .collect()
}

/// Colours a raw heat field with the heat band palette.
pub fn heat_color_from_field(field: &ScalarField, levels: &HeatLevels) -> Vec<Color> {
    field
        .values()
        .iter()
        .map(|&v| levels.color(levels.classify(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TerrainClassifier;

    #[test]
    fn test_water_tiles_use_water_colours_in_biome_layer() {
        let settings = ClassifierSettings::default();
        let height = ScalarField::from_values(2, 1, vec![0.05, 0.25]).unwrap();
        let other = ScalarField::from_values(2, 1, vec![0.5, 0.5]).unwrap();
        let result = TerrainClassifier::new(settings.clone())
            .classify(&height, &other, &other, &other, None)
            .unwrap();
        let buffers = ColorBuffers::build(&result.tiles, &settings);
        assert_eq!(buffers.biome[0], settings.height_levels.deep_water.color);
        assert_eq!(buffers.biome[1], settings.height_levels.shallow_water.color);
        assert_eq!(buffers.height.len(), 2);
    }

    #[test]
    fn test_grayscale_ramp() {
        let field = ScalarField::from_values(2, 1, vec![0.0, 1.0]).unwrap();
        assert_eq!(color_from_field(&field), vec![Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn test_heat_palette() {
        let levels = HeatLevels::default();
        let field = ScalarField::from_values(2, 1, vec![0.0, 0.99]).unwrap();
        let colors = heat_color_from_field(&field, &levels);
        assert_eq!(colors[0], levels.coldest.color);
        assert_eq!(colors[1], levels.warmest_color);
    }
}
