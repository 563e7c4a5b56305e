//! Procedural terrain maps: multi-octave noise fields, height/heat/moisture
//! classification into biomes, preview colour buffers and heightmap meshes.

mod async_generation;
mod cancel;
mod color;
mod curve;
mod error;
mod falloff;
mod field;
mod map;
mod mesh;

pub mod classify;
pub mod noise;

pub use async_generation::{
    AsyncMapGenerator, MapOutput, MapRequest, MapResult, MeshRequest, RequestId,
};
pub use cancel::CancelToken;
pub use color::{Color, to_rgba8_bytes};
pub use curve::{CurveKey, ResponseCurve};
pub use error::TerrainError;
pub use falloff::{FalloffSettings, falloff_map, falloff_value};
pub use field::ScalarField;
pub use map::{
    DEFAULT_CHUNK_SIZE, LateralHeatSettings, MapData, MapGenerator, MapSettings, seed_from_str,
};
pub use mesh::{MAX_LOD, TerrainMesh};
