//! Blue-noise point scattering: Poisson-disk sampling accelerated by a
//! spatial grid, with geometric area filters and grayscale mask post filters.

mod error;
mod filter;
mod grid;
mod poisson;
mod scatter;

pub mod mask;

pub use error::ScatterError;
pub use filter::{CandidateFilter, FilterKind, MaskFilter, Rect};
pub use grid::{MAX_GRID_CELLS, NEIGHBOR_RING, SpatialGrid};
pub use mask::{DensityCloudSettings, MaskBuffer, MaskShape};
pub use poisson::{DEFAULT_REJECTION_LIMIT, PoissonDiskSampler, SamplerSettings};
pub use scatter::{PostFilterSettings, ScatterOutput, ScatterRegion, ScatterSettings};
