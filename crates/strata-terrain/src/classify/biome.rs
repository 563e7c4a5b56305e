//! Discrete classes and the moisture × heat biome table.

use serde::{Deserialize, Serialize};

/// Elevation band, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeightClass {
    DeepWater,
    ShallowWater,
    Shore,
    Sand,
    Grass,
    Forest,
    Rock,
    Snow,
}

impl HeightClass {
    pub const ALL: [HeightClass; 8] = [
        HeightClass::DeepWater,
        HeightClass::ShallowWater,
        HeightClass::Shore,
        HeightClass::Sand,
        HeightClass::Grass,
        HeightClass::Forest,
        HeightClass::Rock,
        HeightClass::Snow,
    ];

    pub fn group(self) -> TerrainGroup {
        match self {
            HeightClass::DeepWater | HeightClass::ShallowWater => TerrainGroup::Water,
            _ => TerrainGroup::Land,
        }
    }
}

/// Temperature band, coldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeatClass {
    Coldest,
    Colder,
    Cold,
    Warm,
    Warmer,
    Warmest,
}

impl HeatClass {
    pub const ALL: [HeatClass; 6] = [
        HeatClass::Coldest,
        HeatClass::Colder,
        HeatClass::Cold,
        HeatClass::Warm,
        HeatClass::Warmer,
        HeatClass::Warmest,
    ];
}

/// Moisture band, driest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoistureClass {
    Dryest,
    Dryer,
    Dry,
    Wet,
    Wetter,
    Wettest,
}

impl MoistureClass {
    pub const ALL: [MoistureClass; 6] = [
        MoistureClass::Dryest,
        MoistureClass::Dryer,
        MoistureClass::Dry,
        MoistureClass::Wet,
        MoistureClass::Wetter,
        MoistureClass::Wettest,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Desert,
    Savanna,
    TropicalRainforest,
    Grassland,
    Woodland,
    SeasonalForest,
    TemperateRainforest,
    BorealForest,
    Tundra,
    Ice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainGroup {
    Water,
    Land,
}

use Biome::*;

/// Biome lookup indexed `[moisture][heat]`, both ascending.
pub const BIOME_TABLE: [[Biome; 6]; 6] = [
    // Columns: Coldest, Colder, Cold, Warm, Warmer, Warmest.
    [Ice, Tundra, Grassland, Desert, Desert, Desert], // Dryest
    [Ice, Tundra, Grassland, Desert, Desert, Desert], // Dryer
    [Ice, Tundra, Woodland, Woodland, Savanna, Savanna], // Dry
    [Ice, Tundra, BorealForest, Woodland, Savanna, Savanna], // Wet
    [Ice, Tundra, BorealForest, SeasonalForest, TropicalRainforest, TropicalRainforest], // Wetter
    [Ice, Tundra, BorealForest, TemperateRainforest, TropicalRainforest, TropicalRainforest], // Wettest
];

pub fn biome_for(moisture: MoistureClass, heat: HeatClass) -> Biome {
    BIOME_TABLE[moisture as usize][heat as usize]
}
