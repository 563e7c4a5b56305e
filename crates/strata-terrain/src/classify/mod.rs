//! Height, heat, moisture and biome classification of generated fields.

mod biome;
mod classifier;
mod colors;
mod levels;

pub use biome::{
    BIOME_TABLE, Biome, HeatClass, HeightClass, MoistureClass, TerrainGroup, biome_for,
};
pub use classifier::{
    Classification, ClassifierSettings, HeatMode, MoistureMode, TerrainClassifier, TileRecord,
};
pub use colors::{ColorBuffers, color_from_field, heat_color_from_field};
pub use levels::{BiomeColors, HeatLevels, HeightBand, HeightLevels, LevelBand, MoistureLevels};
