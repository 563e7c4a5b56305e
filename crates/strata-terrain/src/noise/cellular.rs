//! FastNoiseLite configuration for the cellular backend.

use fastnoise_lite::{
    CellularDistanceFunction, CellularReturnType, DomainWarpType, FastNoiseLite, FractalType,
    NoiseType, RotationType3D,
};
use serde::{Deserialize, Serialize};

use super::params::NoiseParameters;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellularNoiseType {
    OpenSimplex2,
    OpenSimplex2S,
    #[default]
    Cellular,
    Perlin,
    ValueCubic,
    Value,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FractalKind {
    None,
    #[default]
    FBm,
    Ridged,
    PingPong,
    DomainWarpProgressive,
    DomainWarpIndependent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceFunction {
    #[default]
    Euclidean,
    EuclideanSq,
    Manhattan,
    Hybrid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellularReturn {
    CellValue,
    #[default]
    Distance,
    Distance2,
    Distance2Add,
    Distance2Sub,
    Distance2Mul,
    Distance2Div,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainWarpKind {
    #[default]
    OpenSimplex2,
    OpenSimplex2Reduced,
    BasicGrid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationKind {
    #[default]
    None,
    ImproveXYPlanes,
    ImproveXZPlanes,
}

/// Knobs forwarded to FastNoiseLite when the cellular backend is selected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularSettings {
    pub noise_type: CellularNoiseType,
    pub fractal_type: FractalKind,
    pub distance_function: DistanceFunction,
    pub return_type: CellularReturn,
    /// Cell point jitter, `1.0` is the library default.
    pub jitter: f32,
    pub domain_warp_type: DomainWarpKind,
    /// Warp strength. `0` disables the coordinate warp pass.
    pub domain_warp_amplitude: f32,
    pub ping_pong_strength: f32,
    pub weighted_strength: f32,
    pub rotation_type: RotationKind,
}

impl Default for CellularSettings {
    fn default() -> Self {
        Self {
            noise_type: CellularNoiseType::default(),
            fractal_type: FractalKind::default(),
            distance_function: DistanceFunction::default(),
            return_type: CellularReturn::default(),
            jitter: 1.0,
            domain_warp_type: DomainWarpKind::default(),
            domain_warp_amplitude: 0.0,
            ping_pong_strength: 2.0,
            weighted_strength: 0.0,
            rotation_type: RotationKind::default(),
        }
    }
}

/// A configured FastNoiseLite instance plus the warp toggle.
pub(super) struct CellularSampler {
    noise: FastNoiseLite,
    warp: bool,
}

impl CellularSampler {
    /// The generator runs at `params.frequency`. Callers also scale the
    /// sample coordinates by it, so the effective frequency is its square.
    pub(super) fn new(params: &NoiseParameters, seed: u64) -> Self {
        let settings = &params.cellular;
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_frequency(Some(params.frequency));
        noise.set_noise_type(Some(settings.noise_type.into()));
        noise.set_rotation_type_3d(Some(settings.rotation_type.into()));
        noise.set_fractal_type(Some(settings.fractal_type.into()));
        noise.set_fractal_octaves(Some(params.octaves as i32));
        noise.set_fractal_lacunarity(Some(params.lacunarity));
        noise.set_fractal_gain(Some(params.persistence));
        noise.set_fractal_weighted_strength(Some(settings.weighted_strength));
        noise.set_fractal_ping_pong_strength(Some(settings.ping_pong_strength));
        noise.set_cellular_distance_function(Some(settings.distance_function.into()));
        noise.set_cellular_return_type(Some(settings.return_type.into()));
        noise.set_cellular_jitter(Some(settings.jitter));
        noise.set_domain_warp_type(Some(settings.domain_warp_type.into()));
        noise.set_domain_warp_amp(Some(settings.domain_warp_amplitude));
        Self {
            noise,
            warp: settings.domain_warp_amplitude > 0.0,
        }
    }

    /// Raw sample remapped from `[-1, 1]` into `[0, 1]`.
    pub(super) fn sample(&self, x: f64, y: f64) -> f64 {
        let (mut x, mut y) = (x as f32, y as f32);
        if self.warp {
            (x, y) = self.noise.domain_warp_2d(x, y);
        }
        let raw = self.noise.get_noise_2d(x, y) as f64;
        (raw * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl From<CellularNoiseType> for NoiseType {
    fn from(value: CellularNoiseType) -> Self {
        match value {
            CellularNoiseType::OpenSimplex2 => NoiseType::OpenSimplex2,
            CellularNoiseType::OpenSimplex2S => NoiseType::OpenSimplex2S,
            CellularNoiseType::Cellular => NoiseType::Cellular,
            CellularNoiseType::Perlin => NoiseType::Perlin,
            CellularNoiseType::ValueCubic => NoiseType::ValueCubic,
            CellularNoiseType::Value => NoiseType::Value,
        }
    }
}

impl From<FractalKind> for FractalType {
    fn from(value: FractalKind) -> Self {
        match value {
            FractalKind::None => FractalType::None,
            FractalKind::FBm => FractalType::FBm,
            FractalKind::Ridged => FractalType::Ridged,
            FractalKind::PingPong => FractalType::PingPong,
            FractalKind::DomainWarpProgressive => FractalType::DomainWarpProgressive,
            FractalKind::DomainWarpIndependent => FractalType::DomainWarpIndependent,
        }
    }
}

impl From<DistanceFunction> for CellularDistanceFunction {
    fn from(value: DistanceFunction) -> Self {
        match value {
            DistanceFunction::Euclidean => CellularDistanceFunction::Euclidean,
            DistanceFunction::EuclideanSq => CellularDistanceFunction::EuclideanSq,
            DistanceFunction::Manhattan => CellularDistanceFunction::Manhattan,
            DistanceFunction::Hybrid => CellularDistanceFunction::Hybrid,
        }
    }
}

impl From<CellularReturn> for CellularReturnType {
    fn from(value: CellularReturn) -> Self {
        match value {
            CellularReturn::CellValue => CellularReturnType::CellValue,
            CellularReturn::Distance => CellularReturnType::Distance,
            CellularReturn::Distance2 => CellularReturnType::Distance2,
            CellularReturn::Distance2Add => CellularReturnType::Distance2Add,
            CellularReturn::Distance2Sub => CellularReturnType::Distance2Sub,
            CellularReturn::Distance2Mul => CellularReturnType::Distance2Mul,
            CellularReturn::Distance2Div => CellularReturnType::Distance2Div,
        }
    }
}

impl From<DomainWarpKind> for DomainWarpType {
    fn from(value: DomainWarpKind) -> Self {
        match value {
            DomainWarpKind::OpenSimplex2 => DomainWarpType::OpenSimplex2,
            DomainWarpKind::OpenSimplex2Reduced => DomainWarpType::OpenSimplex2Reduced,
            DomainWarpKind::BasicGrid => DomainWarpType::BasicGrid,
        }
    }
}

impl From<RotationKind> for RotationType3D {
    fn from(value: RotationKind) -> Self {
        match value {
            RotationKind::None => RotationType3D::None,
            RotationKind::ImproveXYPlanes => RotationType3D::ImproveXYPlanes,
            RotationKind::ImproveXZPlanes => RotationType3D::ImproveXZPlanes,
        }
    }
}
