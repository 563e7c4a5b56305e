//! Candidate filters consulted by the Poisson-disk sampler.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ScatterError;
use crate::mask::MaskBuffer;

/// Axis-aligned rectangle; `contains` is half-open on the far edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// When a filter runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Consulted for every candidate during sampling.
    Area,
    /// Applied to the finished point set.
    Post,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CandidateFilter {
    /// Accepts points with `distance(center, p)² <= radius²`.
    Circle { center: Vec2, radius: f32 },
    Rectangle { rect: Rect },
    Mask(MaskFilter),
}

impl CandidateFilter {
    pub fn kind(&self) -> FilterKind {
        match self {
            CandidateFilter::Circle { .. } | CandidateFilter::Rectangle { .. } => FilterKind::Area,
            CandidateFilter::Mask(_) => FilterKind::Post,
        }
    }

    /// Test `point`. Only mask filters draw from `rng`.
    pub fn accept<R: Rng + ?Sized>(&self, point: Vec2, rng: &mut R) -> bool {
        match self {
            CandidateFilter::Circle { center, radius } => {
                center.distance_squared(point) <= radius * radius
            }
            CandidateFilter::Rectangle { rect } => rect.contains(point),
            CandidateFilter::Mask(mask) => mask.accept(point, rng),
        }
    }
}

/// Probabilistic filter: a point survives with probability equal to the
/// mask brightness under it (or its complement with inverse logic).
#[derive(Clone, Debug, PartialEq)]
pub struct MaskFilter {
    mask: MaskBuffer,
    region_width: f32,
    region_height: f32,
    inverse_logic: bool,
}

impl MaskFilter {
    /// Wrap a mask rendered at the region's resolution.
    pub fn new(
        mask: MaskBuffer,
        region_width: usize,
        region_height: usize,
        inverse_logic: bool,
    ) -> Result<Self, ScatterError> {
        if mask.width() != region_width || mask.height() != region_height {
            return Err(ScatterError::MaskSizeMismatch {
                expected: region_width * region_height,
                actual: mask.pixels().len(),
            });
        }
        Ok(Self {
            mask,
            region_width: region_width as f32,
            region_height: region_height as f32,
            inverse_logic,
        })
    }

    /// Resample an arbitrarily sized buffer to the region's resolution.
    pub fn from_imported(
        buffer: &MaskBuffer,
        region_width: usize,
        region_height: usize,
        inverse_logic: bool,
    ) -> Result<Self, ScatterError> {
        if buffer.is_empty() {
            return Err(ScatterError::MaskSizeMismatch {
                expected: region_width * region_height,
                actual: 0,
            });
        }
        let mask = buffer.resized_bilinear(region_width, region_height);
        Self::new(mask, region_width, region_height, inverse_logic)
    }

    pub fn mask(&self) -> &MaskBuffer {
        &self.mask
    }

    pub fn accept<R: Rng + ?Sized>(&self, point: Vec2, rng: &mut R) -> bool {
        if self.mask.is_empty() || self.region_width <= 0.0 || self.region_height <= 0.0 {
            return false;
        }
        let px = (point.x * self.mask.width() as f32 / self.region_width) as i64;
        let py = (point.y * self.mask.height() as f32 / self.region_height) as i64;
        let gray = self.mask.sample_clamped(px, py);
        let roll: f32 = rng.random();
        if self.inverse_logic {
            roll > gray
        } else {
            roll < gray
        }
    }
}
