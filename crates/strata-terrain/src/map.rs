//! Full map pipeline: noise layers, classification and preview colours.

use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::classify::{
    ClassifierSettings, ColorBuffers, TerrainClassifier, TileRecord, color_from_field,
    heat_color_from_field,
};
use crate::color::Color;
use crate::curve::ResponseCurve;
use crate::error::TerrainError;
use crate::falloff::falloff_map;
use crate::field::ScalarField;
use crate::mesh::TerrainMesh;
use crate::noise::{
    FeatureShaping, NoiseField, NoiseOutput, NoiseParameterSet, NormalizeMode, TerrainFeature,
    generate_lateral_field,
};

/// Default square map size in cells.
pub const DEFAULT_CHUNK_SIZE: usize = 241;

/// Placement of the lateral heat gradient across the map rows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LateralHeatSettings {
    /// Row (before flipping) where the gradient is zero.
    pub center_point: f32,
    /// Distance from the centre at which the gradient reaches 1.
    pub max_distance: f32,
    /// Added to the row coordinate before measuring distance.
    pub offset: f32,
}

impl Default for LateralHeatSettings {
    fn default() -> Self {
        Self {
            center_point: DEFAULT_CHUNK_SIZE as f32 / 2.0,
            max_distance: DEFAULT_CHUNK_SIZE as f32 / 2.0,
            offset: 0.0,
        }
    }
}

/// Everything needed to reproduce a map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub seed: u64,
    /// Side length of the square map.
    pub chunk_size: usize,
    /// Added to every sample position; shifts the map through noise space.
    pub offset: Vec2,
    pub noise: NoiseParameterSet,
    pub normalize: NormalizeMode,
    /// Shaping applied to the height layer only.
    pub features: Vec<TerrainFeature>,
    pub shaping: FeatureShaping,
    pub classifier: ClassifierSettings,
    pub lateral_heat: LateralHeatSettings,
    pub mesh_height_multiplier: f32,
    pub mesh_height_curve: ResponseCurve,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            offset: Vec2::ZERO,
            noise: NoiseParameterSet::default(),
            normalize: NormalizeMode::Local,
            features: Vec::new(),
            shaping: FeatureShaping::default(),
            classifier: ClassifierSettings::default(),
            lateral_heat: LateralHeatSettings::default(),
            mesh_height_multiplier: 25.0,
            mesh_height_curve: ResponseCurve::linear(),
        }
    }
}

/// All fields, tiles and preview colours of one generated map.
#[derive(Clone, Debug)]
pub struct MapData {
    pub size: usize,
    /// Seeds actually used for each layer.
    pub height_seed: u64,
    pub heat_seed: u64,
    pub moisture_seed: u64,
    /// Classified height (falloff applied).
    pub height: ScalarField,
    pub heat: ScalarField,
    pub random_heat: ScalarField,
    pub lateral_heat: ScalarField,
    pub moisture: ScalarField,
    pub falloff: Option<ScalarField>,
    pub tiles: Vec<TileRecord>,
    pub colors: ColorBuffers,
    pub height_grayscale: Vec<Color>,
    pub random_heat_colors: Vec<Color>,
    pub lateral_heat_colors: Vec<Color>,
}

/// Owns map settings and the cached falloff map.
pub struct MapGenerator {
    settings: MapSettings,
    falloff: Option<ScalarField>,
}

impl MapGenerator {
    /// Create a generator. Call [`MapGenerator::initialize`] before
    /// generating when the classifier uses a falloff.
    pub fn new(settings: MapSettings) -> Self {
        Self {
            settings,
            falloff: None,
        }
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Propagate master noise parameters and build the falloff map.
    pub fn initialize(&mut self) {
        self.settings.noise.apply_master();
        let size = self.settings.chunk_size;
        self.falloff = self
            .settings
            .classifier
            .falloff
            .map(|falloff| falloff_map(size, size, falloff));
        tracing::debug!(
            "Map generator initialized (size {size}, falloff: {})",
            self.falloff.is_some()
        );
    }

    /// Replace the settings and re-run [`MapGenerator::initialize`].
    pub fn on_parameters_changed(&mut self, settings: MapSettings) {
        self.settings = settings;
        self.initialize();
    }

    pub fn generate(&self, center: Vec2) -> Result<MapData, TerrainError> {
        self.generate_with_cancel(center, &CancelToken::new())
    }

    /// Generate the map centred at `center`, checking `cancel` between rows.
    pub fn generate_with_cancel(
        &self,
        center: Vec2,
        cancel: &CancelToken,
    ) -> Result<MapData, TerrainError> {
        let start = std::time::Instant::now();
        let settings = &self.settings;
        let size = settings.chunk_size;
        if size == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: size,
                height: size,
            });
        }

        let height_params = settings.noise.by_output(NoiseOutput::Height)?;
        let heat_params = settings.noise.by_output(NoiseOutput::Heat)?;
        let moisture_params = settings.noise.by_output(NoiseOutput::Moisture)?;

        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
        let height_seed = settings.seed;
        let moisture_seed = settings.seed.wrapping_add(rng.random::<u64>());
        let heat_seed = settings.seed.wrapping_add(rng.random::<u64>());
        let offset = center + settings.offset;

        let features = (!settings.features.is_empty())
            .then(|| (settings.features.as_slice(), settings.shaping));
        let height = NoiseField::generate_with_cancel(
            size,
            size,
            height_seed,
            offset,
            height_params,
            settings.normalize,
            features,
            cancel,
        )?;
        let random_heat = NoiseField::generate_with_cancel(
            size,
            size,
            heat_seed,
            offset,
            heat_params,
            settings.normalize,
            None,
            cancel,
        )?;
        let moisture = NoiseField::generate_with_cancel(
            size,
            size,
            moisture_seed,
            offset,
            moisture_params,
            settings.normalize,
            None,
            cancel,
        )?;
        let lateral = settings.lateral_heat;
        let lateral_heat = generate_lateral_field(
            size,
            lateral.center_point,
            lateral.max_distance,
            lateral.offset,
        );

        let falloff = self.falloff_for(size);
        let classifier = TerrainClassifier::new(settings.classifier.clone());
        let classification = classifier.classify(
            &height,
            &random_heat,
            &lateral_heat,
            &moisture,
            falloff.as_deref(),
        )?;
        let colors = ColorBuffers::build(&classification.tiles, &settings.classifier);

        tracing::debug!(
            "Generated {size}x{size} map at ({}, {}) in {:.2}ms",
            center.x,
            center.y,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(MapData {
            size,
            height_seed,
            heat_seed,
            moisture_seed,
            height_grayscale: color_from_field(&classification.height),
            random_heat_colors: heat_color_from_field(
                &random_heat,
                &settings.classifier.heat_levels,
            ),
            lateral_heat_colors: heat_color_from_field(
                &lateral_heat,
                &settings.classifier.heat_levels,
            ),
            height: classification.height,
            heat: classification.heat,
            random_heat,
            lateral_heat,
            moisture: classification.moisture,
            falloff: falloff.map(Cow::into_owned),
            tiles: classification.tiles,
            colors,
        })
    }

    /// The cached falloff when it fits `size`, otherwise one built on the
    /// spot. `None` when the classifier has no falloff configured.
    fn falloff_for(&self, size: usize) -> Option<Cow<'_, ScalarField>> {
        let settings = self.settings.classifier.falloff?;
        match &self.falloff {
            Some(cached) if cached.width() == size && cached.height() == size => {
                Some(Cow::Borrowed(cached))
            }
            _ => {
                tracing::debug!("Building {size}x{size} falloff map outside initialize");
                Some(Cow::Owned(falloff_map(size, size, settings)))
            }
        }
    }

    /// Mesh the map's height field with the configured curve and multiplier.
    pub fn mesh(&self, data: &MapData, lod: u32) -> TerrainMesh {
        TerrainMesh::from_height_field(
            &data.height,
            self.settings.mesh_height_multiplier,
            &self.settings.mesh_height_curve,
            lod,
        )
    }
}

/// Turn a user-facing seed string into a numeric seed. Numeric strings are
/// used directly; anything else is hashed.
pub fn seed_from_str(seed: &str) -> u64 {
    let trimmed = seed.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return value;
    }
    let mut hasher = DefaultHasher::new();
    trimmed.hash(&mut hasher);
    hasher.finish()
}
