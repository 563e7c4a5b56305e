//! Classification thresholds and their preview colours.

use serde::{Deserialize, Serialize};

use super::biome::{Biome, HeatClass, HeightClass, MoistureClass};
use crate::color::Color;

/// One height band: its lower threshold, the climate offsets it applies
/// and its preview colour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightBand {
    pub threshold: f32,
    /// Subtracted from heat (× height) on land bands.
    pub temperature_offset: f32,
    /// Added to moisture (× height) on water and beach bands.
    pub moisture_offset: f32,
    pub color: Color,
}

impl HeightBand {
    const fn new(
        threshold: f32,
        temperature_offset: f32,
        moisture_offset: f32,
        color: Color,
    ) -> Self {
        Self {
            threshold,
            temperature_offset,
            moisture_offset,
            color,
        }
    }
}

/// Height thresholds. A value below `shallow_water` is deep water; a value
/// at or above `snow` is snow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightLevels {
    pub deep_water: HeightBand,
    pub shallow_water: HeightBand,
    pub shore: HeightBand,
    pub sand: HeightBand,
    pub grass: HeightBand,
    pub forest: HeightBand,
    pub rock: HeightBand,
    pub snow: HeightBand,
}

impl Default for HeightLevels {
    fn default() -> Self {
        Self {
            deep_water: HeightBand::new(0.1, 0.0, 8.0, Color::rgb(0.0, 0.0, 0.5)),
            shallow_water: HeightBand::new(0.2, 0.0, 3.0, Color::rgb8(25, 25, 150)),
            shore: HeightBand::new(0.3, 0.0, 1.0, Color::rgb8(240, 240, 64)),
            sand: HeightBand::new(0.5, 0.0, 0.25, Color::rgb8(240, 240, 64)),
            grass: HeightBand::new(0.7, 0.1, 0.0, Color::rgb8(50, 220, 20)),
            forest: HeightBand::new(0.8, 0.2, 0.0, Color::rgb8(16, 160, 0)),
            rock: HeightBand::new(0.9, 0.3, 0.0, Color::gray(0.5)),
            snow: HeightBand::new(1.0, 0.4, 0.0, Color::WHITE),
        }
    }
}

impl HeightLevels {
    pub fn band(&self, class: HeightClass) -> &HeightBand {
        match class {
            HeightClass::DeepWater => &self.deep_water,
            HeightClass::ShallowWater => &self.shallow_water,
            HeightClass::Shore => &self.shore,
            HeightClass::Sand => &self.sand,
            HeightClass::Grass => &self.grass,
            HeightClass::Forest => &self.forest,
            HeightClass::Rock => &self.rock,
            HeightClass::Snow => &self.snow,
        }
    }

    pub fn classify(&self, height: f32) -> HeightClass {
        if height < self.shallow_water.threshold {
            HeightClass::DeepWater
        } else if height < self.shore.threshold {
            HeightClass::ShallowWater
        } else if height < self.sand.threshold {
            HeightClass::Shore
        } else if height < self.grass.threshold {
            HeightClass::Sand
        } else if height < self.forest.threshold {
            HeightClass::Grass
        } else if height < self.rock.threshold {
            HeightClass::Forest
        } else if height < self.snow.threshold {
            HeightClass::Rock
        } else {
            HeightClass::Snow
        }
    }

    /// Heat penalty per unit height. Zero below the grass band.
    pub fn temperature_offset(&self, class: HeightClass) -> f32 {
        match class {
            HeightClass::Grass | HeightClass::Forest | HeightClass::Rock | HeightClass::Snow => {
                self.band(class).temperature_offset
            }
            _ => 0.0,
        }
    }

    /// Moisture bonus per unit height. Zero from the grass band up.
    pub fn moisture_offset(&self, class: HeightClass) -> f32 {
        match class {
            HeightClass::DeepWater
            | HeightClass::ShallowWater
            | HeightClass::Shore
            | HeightClass::Sand => self.band(class).moisture_offset,
            _ => 0.0,
        }
    }
}

/// A threshold paired with the colour of the band it bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelBand {
    pub value: f32,
    pub color: Color,
}

impl LevelBand {
    const fn new(value: f32, color: Color) -> Self {
        Self { value, color }
    }
}

/// Heat thresholds; each band's value is its exclusive upper bound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatLevels {
    pub coldest: LevelBand,
    pub colder: LevelBand,
    pub cold: LevelBand,
    pub warm: LevelBand,
    pub warmer: LevelBand,
    pub warmest_color: Color,
}

impl Default for HeatLevels {
    fn default() -> Self {
        Self {
            coldest: LevelBand::new(0.005, Color::rgb(0.0, 1.0, 1.0)),
            colder: LevelBand::new(0.18, Color::rgb(170.0 / 255.0, 1.0, 1.0)),
            cold: LevelBand::new(0.4, Color::rgb8(0, 229, 133)),
            warm: LevelBand::new(0.6, Color::rgb(1.0, 1.0, 100.0 / 255.0)),
            warmer: LevelBand::new(0.8, Color::rgb(1.0, 100.0 / 255.0, 0.0)),
            warmest_color: Color::rgb8(241, 12, 0),
        }
    }
}

impl HeatLevels {
    pub fn classify(&self, heat: f32) -> HeatClass {
        if heat < self.coldest.value {
            HeatClass::Coldest
        } else if heat < self.colder.value {
            HeatClass::Colder
        } else if heat < self.cold.value {
            HeatClass::Cold
        } else if heat < self.warm.value {
            HeatClass::Warm
        } else if heat < self.warmer.value {
            HeatClass::Warmer
        } else {
            HeatClass::Warmest
        }
    }

    pub fn color(&self, class: HeatClass) -> Color {
        match class {
            HeatClass::Coldest => self.coldest.color,
            HeatClass::Colder => self.colder.color,
            HeatClass::Cold => self.cold.color,
            HeatClass::Warm => self.warm.color,
            HeatClass::Warmer => self.warmer.color,
            HeatClass::Warmest => self.warmest_color,
        }
    }
}

/// Moisture thresholds; each band's value is its inclusive lower bound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoistureLevels {
    pub dryest_color: Color,
    pub dryer: LevelBand,
    pub dry: LevelBand,
    pub wet: LevelBand,
    pub wetter: LevelBand,
    pub wettest: LevelBand,
}

impl Default for MoistureLevels {
    fn default() -> Self {
        Self {
            dryest_color: Color::rgb8(255, 139, 17),
            dryer: LevelBand::new(0.27, Color::rgb8(245, 245, 23)),
            dry: LevelBand::new(0.4, Color::rgb8(80, 255, 0)),
            wet: LevelBand::new(0.6, Color::rgb8(85, 255, 255)),
            wetter: LevelBand::new(0.8, Color::rgb8(20, 70, 255)),
            wettest: LevelBand::new(0.9, Color::rgb8(0, 0, 100)),
        }
    }
}

impl MoistureLevels {
    pub fn classify(&self, moisture: f32) -> MoistureClass {
        if moisture < self.dryer.value {
            MoistureClass::Dryest
        } else if moisture < self.dry.value {
            MoistureClass::Dryer
        } else if moisture < self.wet.value {
            MoistureClass::Dry
        } else if moisture < self.wetter.value {
            MoistureClass::Wet
        } else if moisture < self.wettest.value {
            MoistureClass::Wetter
        } else {
            MoistureClass::Wettest
        }
    }

    pub fn color(&self, class: MoistureClass) -> Color {
        match class {
            MoistureClass::Dryest => self.dryest_color,
            MoistureClass::Dryer => self.dryer.color,
            MoistureClass::Dry => self.dry.color,
            MoistureClass::Wet => self.wet.color,
            MoistureClass::Wetter => self.wetter.color,
            MoistureClass::Wettest => self.wettest.color,
        }
    }
}

/// Preview colour per biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeColors {
    pub ice: Color,
    pub desert: Color,
    pub savanna: Color,
    pub tropical_rainforest: Color,
    pub tundra: Color,
    pub temperate_rainforest: Color,
    pub grassland: Color,
    pub seasonal_forest: Color,
    pub boreal_forest: Color,
    pub woodland: Color,
}

impl Default for BiomeColors {
    fn default() -> Self {
        Self {
            ice: Color::WHITE,
            desert: Color::rgb8(238, 218, 130),
            savanna: Color::rgb8(177, 209, 110),
            tropical_rainforest: Color::rgb8(66, 123, 25),
            tundra: Color::rgb8(96, 131, 112),
            temperate_rainforest: Color::rgb8(29, 73, 40),
            grassland: Color::rgb8(164, 225, 99),
            seasonal_forest: Color::rgb8(73, 100, 35),
            boreal_forest: Color::rgb8(95, 115, 62),
            woodland: Color::rgb8(139, 175, 90),
        }
    }
}

impl BiomeColors {
    pub fn color(&self, biome: Biome) -> Color {
        match biome {
            Biome::Ice => self.ice,
            Biome::Desert => self.desert,
            Biome::Savanna => self.savanna,
            Biome::TropicalRainforest => self.tropical_rainforest,
            Biome::Tundra => self.tundra,
            Biome::TemperateRainforest => self.temperate_rainforest,
            Biome::Grassland => self.grassland,
            Biome::SeasonalForest => self.seasonal_forest,
            Biome::BorealForest => self.boreal_forest,
            Biome::Woodland => self.woodland,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_ladder_boundaries() {
        let levels = HeightLevels::default();
        assert_eq!(levels.classify(0.0), HeightClass::DeepWater);
        assert_eq!(levels.classify(0.199), HeightClass::DeepWater);
        assert_eq!(levels.classify(0.2), HeightClass::ShallowWater);
        assert_eq!(levels.classify(0.3), HeightClass::Shore);
        assert_eq!(levels.classify(0.5), HeightClass::Sand);
        assert_eq!(levels.classify(0.7), HeightClass::Grass);
        assert_eq!(levels.classify(0.8), HeightClass::Forest);
        assert_eq!(levels.classify(0.9), HeightClass::Rock);
        assert_eq!(levels.classify(1.0), HeightClass::Snow);
        assert_eq!(levels.classify(1.7), HeightClass::Snow);
    }

    #[test]
    fn test_offsets_only_apply_to_their_bands() {
        let levels = HeightLevels::default();
        assert_eq!(levels.temperature_offset(HeightClass::Sand), 0.0);
        assert_eq!(levels.temperature_offset(HeightClass::Rock), 0.3);
        assert_eq!(levels.moisture_offset(HeightClass::DeepWater), 8.0);
        assert_eq!(levels.moisture_offset(HeightClass::Grass), 0.0);
    }

    #[test]
    fn test_heat_and_moisture_ladders() {
        let heat = HeatLevels::default();
        assert_eq!(heat.classify(0.0), HeatClass::Coldest);
        assert_eq!(heat.classify(0.1), HeatClass::Colder);
        assert_eq!(heat.classify(0.5), HeatClass::Warm);
        assert_eq!(heat.classify(0.95), HeatClass::Warmest);

        let moisture = MoistureLevels::default();
        assert_eq!(moisture.classify(0.1), MoistureClass::Dryest);
        assert_eq!(moisture.classify(0.3), MoistureClass::Dryer);
        assert_eq!(moisture.classify(0.85), MoistureClass::Wetter);
        assert_eq!(moisture.classify(3.0), MoistureClass::Wettest);
    }
}
