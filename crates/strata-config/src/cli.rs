//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use strata_terrain::seed_from_str;

use crate::Config;

/// strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Procedural terrain maps and point scattering")]
pub struct CliArgs {
    /// Seed for both terrain and scattering. Numbers are used as is, other
    /// text is hashed.
    #[arg(long)]
    pub seed: Option<String>,

    /// Map side length in cells.
    #[arg(long)]
    pub size: Option<usize>,

    /// Minimum distance between scattered points.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Directory preview images are written to.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Grayscale image to use as the scatter mask.
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref seed) = args.seed {
            let seed = seed_from_str(seed);
            self.terrain.seed = seed;
            self.scatter.seed = seed;
        }
        if let Some(size) = args.size {
            self.terrain.chunk_size = size;
        }
        if let Some(radius) = args.radius {
            self.scatter.radius = radius;
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(ref mask) = args.mask {
            self.output.imported_mask = Some(mask.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
