//! Multi-octave noise fields.
//!
//! A [`NoiseField`] samples either classic Perlin noise (`noise` crate) or a
//! configurable FastNoiseLite generator over a rectangular grid, optionally
//! reshapes each sample with terrain features, and normalizes the result.

mod cellular;
mod feature;
mod field;
mod params;

pub use cellular::{
    CellularNoiseType, CellularReturn, CellularSettings, DistanceFunction, DomainWarpKind,
    FractalKind, RotationKind,
};
pub use feature::{FeatureKind, FeatureShaping, TerrainFeature};
pub use field::{NoiseField, generate_lateral_field};
pub use params::{
    DEFAULT_GLOBAL_NORMALIZE_FACTOR, MAX_OCTAVES, MIN_SCALE, NoiseBackend, NoiseLayer,
    NoiseOutput, NoiseParameterSet, NoiseParameters, NormalizeMode,
};
