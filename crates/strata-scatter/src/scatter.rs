//! Region, filter and mask wiring around the Poisson-disk sampler.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ScatterError;
use crate::filter::{CandidateFilter, MaskFilter};
use crate::mask::{MaskBuffer, MaskShape};
use crate::poisson::{DEFAULT_REJECTION_LIMIT, PoissonDiskSampler, SamplerSettings};

/// Shape of the area points are scattered over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScatterRegion {
    Rectangular { size: Vec2 },
    /// Disc of `radius`, sampled inside its square bounding box.
    Circular { radius: f32 },
}

impl Default for ScatterRegion {
    fn default() -> Self {
        Self::Rectangular {
            size: Vec2::new(100.0, 100.0),
        }
    }
}

impl ScatterRegion {
    /// Size of the sampled rectangle.
    pub fn bounds(&self) -> Vec2 {
        match *self {
            ScatterRegion::Rectangular { size } => size,
            ScatterRegion::Circular { radius } => Vec2::splat((radius.max(0.0) * 2.0).ceil()),
        }
    }

    /// Area filter restricting points to the region shape, if it is not
    /// already rectangular.
    pub fn area_filter(&self) -> Option<CandidateFilter> {
        match *self {
            ScatterRegion::Rectangular { .. } => None,
            ScatterRegion::Circular { radius } => Some(CandidateFilter::Circle {
                center: self.bounds() / 2.0,
                radius,
            }),
        }
    }
}

/// Mask applied to the finished point set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFilterSettings {
    /// Procedural mask. Ignored when an imported mask is supplied.
    pub shape: Option<MaskShape>,
    pub inverse_colors: bool,
    pub inverse_logic: bool,
    /// Rotation of the generated mask in degrees.
    pub rotation: Option<f32>,
}

/// Complete scatter configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSettings {
    pub radius: f32,
    pub seed: u64,
    pub rejection_limit: u32,
    pub start_point: Option<Vec2>,
    pub region: ScatterRegion,
    pub post_filter: PostFilterSettings,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            radius: 5.0,
            seed: 0,
            rejection_limit: DEFAULT_REJECTION_LIMIT,
            start_point: None,
            region: ScatterRegion::default(),
            post_filter: PostFilterSettings::default(),
        }
    }
}

/// Points plus the mask that filtered them, if any.
#[derive(Clone, Debug)]
pub struct ScatterOutput {
    pub points: Vec<Vec2>,
    pub region_size: Vec2,
    pub mask: Option<MaskBuffer>,
}

impl ScatterSettings {
    pub fn sampler_settings(&self) -> SamplerSettings {
        SamplerSettings {
            radius: self.radius,
            region_size: self.region.bounds(),
            seed: self.seed,
            rejection_limit: self.rejection_limit,
            start_point: self.start_point,
        }
    }

    /// Region filter followed by the post-filter mask.
    pub fn build_filters(
        &self,
        imported: Option<&MaskBuffer>,
    ) -> Result<Vec<CandidateFilter>, ScatterError> {
        let bounds = self.region.bounds();
        let (width, height) = (bounds.x.max(0.0) as usize, bounds.y.max(0.0) as usize);
        let mut filters: Vec<CandidateFilter> = self.region.area_filter().into_iter().collect();
        let post = &self.post_filter;

        let mask_filter = match (imported, &post.shape) {
            (Some(buffer), _) => Some(MaskFilter::from_imported(
                buffer,
                width,
                height,
                post.inverse_logic,
            )?),
            (None, Some(shape)) => {
                let mask = shape.generate(width, height, post.inverse_colors, post.rotation);
                Some(MaskFilter::new(mask, width, height, post.inverse_logic)?)
            }
            (None, None) => None,
        };
        filters.extend(mask_filter.map(CandidateFilter::Mask));
        Ok(filters)
    }

    /// Run the sampler with every configured filter.
    pub fn scatter(&self, imported: Option<&MaskBuffer>) -> Result<ScatterOutput, ScatterError> {
        let filters = self.build_filters(imported)?;
        let points = PoissonDiskSampler::generate(&self.sampler_settings(), &filters);
        let mask = filters.into_iter().find_map(|f| match f {
            CandidateFilter::Mask(mask) => Some(mask.mask().clone()),
            _ => None,
        });
        tracing::debug!("Scattered {} points over {:?}", points.len(), self.region);
        Ok(ScatterOutput {
            points,
            region_size: self.region.bounds(),
            mask,
        })
    }
}
