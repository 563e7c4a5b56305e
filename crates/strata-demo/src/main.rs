//! Generates a terrain map and a scattered point set, then writes PNG
//! previews.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p strata-demo -- --seed 42 --radius 4`.

mod export;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use glam::Vec2;
use strata_config::{CliArgs, Config, ConfigError};
use strata_scatter::{ScatterError, ScatterOutput};
use strata_terrain::{
    AsyncMapGenerator, MapData, MapGenerator, MapOutput, MapRequest, MeshRequest, TerrainError,
};
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("terrain generation failed: {0}")]
    Terrain(#[from] TerrainError),
    #[error("scatter failed: {0}")]
    Scatter(#[from] ScatterError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pixel buffer does not fit a {width}x{height} image")]
    BufferSize { width: usize, height: usize },
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = Config::resolve_dir(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("{e}, using ./.strata");
        Path::new(".strata").to_path_buf()
    });

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(err) = run(&config) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), DemoError> {
    let mut generator = MapGenerator::new(config.terrain.clone());
    generator.initialize();

    let data = generator.generate(Vec2::ZERO)?;
    info!(
        "Generated {}x{} map (height seed {}, heat seed {}, moisture seed {})",
        data.size, data.size, data.height_seed, data.heat_seed, data.moisture_seed
    );
    log_biome_summary(&data);

    let mesh = generator.mesh(&data, config.output.mesh_lod);
    info!(
        "Mesh at LOD {}: {} vertices, {} triangles",
        config.output.mesh_lod,
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    let generator = Arc::new(generator);
    if config.debug.async_neighbors {
        generate_neighbors(&generator, &data);
    }

    let imported = config
        .output
        .imported_mask
        .as_deref()
        .map(export::load_mask)
        .transpose()?;
    let scatter = config.scatter.scatter(imported.as_ref())?;
    info!(
        "Scattered {} points over {}x{} (radius {})",
        scatter.points.len(),
        scatter.region_size.x,
        scatter.region_size.y,
        config.scatter.radius
    );

    if config.output.write_png {
        write_previews(&config.output.directory, &data, &scatter)?;
    }
    Ok(())
}

fn log_biome_summary(data: &MapData) {
    let mut counts = std::collections::BTreeMap::new();
    for tile in &data.tiles {
        *counts.entry(format!("{:?}", tile.biome)).or_insert(0usize) += 1;
    }
    for (biome, count) in counts {
        info!("  {biome}: {count} tiles");
    }
}

/// Generate the four edge neighbours of the origin map on the worker pool and
/// mesh one of them.
fn generate_neighbors(generator: &Arc<MapGenerator>, origin: &MapData) {
    let pool = AsyncMapGenerator::with_defaults(Arc::clone(generator));
    if pool.worker_count() == 0 {
        warn!("No map generation workers available, skipping neighbours");
        return;
    }
    let step = origin.size as f32;
    let centers = [
        Vec2::new(step, 0.0),
        Vec2::new(-step, 0.0),
        Vec2::new(0.0, step),
        Vec2::new(0.0, -step),
    ];

    for center in centers {
        if pool.submit(MapRequest { center }).is_err() {
            warn!("Map queue full, skipping neighbour at {center}");
        }
    }
    if pool
        .submit_mesh(MeshRequest {
            height: Arc::new(origin.height.clone()),
            lod: 2,
        })
        .is_err()
    {
        warn!("Map queue full, skipping mesh request");
    }

    info!("Waiting on {} workers", pool.worker_count());
    while pool.in_flight_count() > 0 {
        std::thread::sleep(Duration::from_millis(5));
    }

    for result in pool.drain_results() {
        match result.output {
            MapOutput::Map(map) => info!(
                "Request {:?}: map with {} tiles in {} us",
                result.id,
                map.tiles.len(),
                result.generation_time_us
            ),
            MapOutput::Mesh(mesh) => info!(
                "Request {:?}: mesh with {} triangles in {} us",
                result.id,
                mesh.triangle_count(),
                result.generation_time_us
            ),
            MapOutput::Failed(err) => warn!("Request {:?} failed: {err}", result.id),
        }
    }
}

fn write_previews(dir: &Path, data: &MapData, scatter: &ScatterOutput) -> Result<(), DemoError> {
    let written = export::write_map_layers(dir, data)?;
    if let Some(mask) = &scatter.mask {
        export::write_mask(dir, "scatter_mask", mask)?;
    }
    let points_path = dir.join("scatter_points.png");
    export::render_points(&scatter.points, scatter.region_size, scatter.mask.as_ref())
        .save(&points_path)?;
    info!(
        "Wrote {} previews to {}",
        written.len() + 1 + usize::from(scatter.mask.is_some()),
        dir.display()
    );
    Ok(())
}
