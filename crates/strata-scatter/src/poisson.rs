//! Bridson-style Poisson-disk sampling over a rectangular region.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::filter::{CandidateFilter, FilterKind};
use crate::grid::SpatialGrid;

/// Candidates tried around an active point before it is retired.
pub const DEFAULT_REJECTION_LIMIT: u32 = 30;

/// ChaCha stream used by post filters, separate from the placement stream.
const POST_FILTER_STREAM: u64 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    /// Minimum distance between any two output points.
    pub radius: f32,
    /// Sampling happens in `[0, region_size.x) × [0, region_size.y)`.
    pub region_size: Vec2,
    pub seed: u64,
    pub rejection_limit: u32,
    /// Initial active point. `None`, or a point outside the region, starts
    /// from the region centre.
    pub start_point: Option<Vec2>,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            radius: 5.0,
            region_size: Vec2::new(100.0, 100.0),
            seed: 0,
            rejection_limit: DEFAULT_REJECTION_LIMIT,
            start_point: None,
        }
    }
}

impl SamplerSettings {
    fn start(&self) -> Vec2 {
        match self.start_point {
            Some(p)
                if (0.0..=self.region_size.x).contains(&p.x)
                    && (0.0..=self.region_size.y).contains(&p.y) =>
            {
                p
            }
            _ => self.region_size / 2.0,
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.radius > 0.0
            && (2.0 * self.radius).is_finite()
            && self.region_size.x > 0.0
            && self.region_size.y > 0.0
            && self.region_size.is_finite())
    }
}

pub struct PoissonDiskSampler;

impl PoissonDiskSampler {
    /// Sample points at least `settings.radius` apart.
    ///
    /// The first area filter (if any) must accept every placed point. Post
    /// filters then thin the result: a point is kept when any of them
    /// accepts it. Output is identical for identical inputs.
    pub fn generate(settings: &SamplerSettings, filters: &[CandidateFilter]) -> Vec<Vec2> {
        if settings.is_degenerate() {
            return Vec::new();
        }
        let start = std::time::Instant::now();
        let radius = settings.radius;
        let region = settings.region_size;
        let area = filters.iter().find(|f| f.kind() == FilterKind::Area);
        let post: Vec<&CandidateFilter> = filters
            .iter()
            .filter(|f| f.kind() == FilterKind::Post)
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
        let Some(mut grid) = SpatialGrid::new(region, radius) else {
            tracing::warn!(
                "Poisson radius {radius} is too small for a {}x{} region, no points placed",
                region.x,
                region.y
            );
            return Vec::new();
        };
        let mut points: Vec<Vec2> = Vec::new();
        let mut active = vec![settings.start()];

        while !active.is_empty() {
            let spawn_index = rng.random_range(0..active.len());
            let centre = active[spawn_index];
            let mut accepted = false;

            for _ in 0..settings.rejection_limit {
                let angle = rng.random::<f32>() * TAU;
                let direction = Vec2::new(libm::sinf(angle), libm::cosf(angle));
                let candidate = centre + direction * rng.random_range(radius..2.0 * radius);

                let inside = candidate.x >= 0.0
                    && candidate.y >= 0.0
                    && candidate.x < region.x
                    && candidate.y < region.y
                    && grid.cell_of(candidate).is_some();
                if !inside {
                    continue;
                }
                if let Some(filter) = area
                    && !filter.accept(candidate, &mut rng)
                {
                    continue;
                }
                if !grid.is_far_enough(candidate, radius, &points) {
                    continue;
                }

                points.push(candidate);
                active.push(candidate);
                grid.insert(candidate, points.len() - 1);
                accepted = true;
                break;
            }

            if !accepted {
                active.remove(spawn_index);
            }
        }

        let placed = points.len();
        if !post.is_empty() {
            let mut post_rng = ChaCha8Rng::seed_from_u64(settings.seed);
            post_rng.set_stream(POST_FILTER_STREAM);
            points.retain(|&p| post.iter().any(|f| f.accept(p, &mut post_rng)));
        }

        tracing::debug!(
            "Poisson sampling placed {placed} points, kept {} (radius {radius}, region {}x{}) in {:.2}ms",
            points.len(),
            region.x,
            region.y,
            start.elapsed().as_secs_f64() * 1000.0
        );

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{MaskFilter, Rect};
    use crate::mask::MaskBuffer;

    fn settings(radius: f32, size: f32, seed: u64) -> SamplerSettings {
        SamplerSettings {
            radius,
            region_size: Vec2::splat(size),
            seed,
            ..Default::default()
        }
    }

    fn min_separation(points: &[Vec2]) -> f32 {
        let mut best = f32::MAX;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                best = best.min(a.distance(*b));
            }
        }
        best
    }

    #[test]
    fn test_points_respect_radius_and_bounds() {
        let s = settings(4.0, 80.0, 3);
        let points = PoissonDiskSampler::generate(&s, &[]);
        assert!(points.len() > 50, "expected a dense fill, got {}", points.len());
        assert!(min_separation(&points) >= 4.0);
        for p in &points {
            assert!(p.x >= 0.0 && p.x < 80.0 && p.y >= 0.0 && p.y < 80.0, "{p}");
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let s = settings(5.0, 100.0, 7);
        assert_eq!(
            PoissonDiskSampler::generate(&s, &[]),
            PoissonDiskSampler::generate(&s, &[])
        );
        let other = settings(5.0, 100.0, 8);
        assert_ne!(
            PoissonDiskSampler::generate(&s, &[]),
            PoissonDiskSampler::generate(&other, &[])
        );
    }

    #[test]
    fn test_degenerate_inputs_yield_nothing() {
        assert!(PoissonDiskSampler::generate(&settings(0.0, 100.0, 1), &[]).is_empty());
        assert!(PoissonDiskSampler::generate(&settings(-2.0, 100.0, 1), &[]).is_empty());
        assert!(PoissonDiskSampler::generate(&settings(5.0, 0.0, 1), &[]).is_empty());
    }

    #[test]
    fn test_extreme_radii_yield_nothing() {
        // Twice this radius overflows f32.
        assert!(PoissonDiskSampler::generate(&settings(2e38, 100.0, 1), &[]).is_empty());
        // The acceleration grid for this spacing would not fit in memory.
        assert!(PoissonDiskSampler::generate(&settings(1e-5, 100.0, 1), &[]).is_empty());
    }

    #[test]
    fn test_radius_larger_than_region_places_nothing() {
        let points = PoissonDiskSampler::generate(&settings(1e38, 100.0, 1), &[]);
        assert!(points.is_empty());
    }

    #[test]
    fn test_zero_rejection_limit_places_nothing() {
        let s = SamplerSettings {
            rejection_limit: 0,
            ..settings(5.0, 50.0, 1)
        };
        assert!(PoissonDiskSampler::generate(&s, &[]).is_empty());
    }

    #[test]
    fn test_only_first_area_filter_is_consulted() {
        let s = settings(3.0, 60.0, 11);
        let rect = CandidateFilter::Rectangle {
            rect: Rect::new(10.0, 10.0, 40.0, 40.0),
        };
        let rejects_all = CandidateFilter::Circle {
            center: Vec2::new(-100.0, -100.0),
            radius: 1.0,
        };
        let points = PoissonDiskSampler::generate(&s, &[rect, rejects_all]);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.x >= 10.0 && p.x < 50.0));
    }

    #[test]
    fn test_white_post_mask_keeps_everything() {
        let s = settings(5.0, 64.0, 2);
        let unfiltered = PoissonDiskSampler::generate(&s, &[]);
        let white = MaskFilter::new(MaskBuffer::filled(64, 64, 1.0), 64, 64, false).unwrap();
        let filtered = PoissonDiskSampler::generate(&s, &[CandidateFilter::Mask(white)]);
        assert_eq!(unfiltered, filtered);
    }

    #[test]
    fn test_black_post_mask_removes_everything() {
        let s = settings(5.0, 64.0, 2);
        let black = MaskFilter::new(MaskBuffer::filled(64, 64, 0.0), 64, 64, false).unwrap();
        assert!(PoissonDiskSampler::generate(&s, &[CandidateFilter::Mask(black)]).is_empty());
    }

    #[test]
    fn test_any_post_filter_may_keep_a_point() {
        let s = settings(5.0, 64.0, 2);
        let black = MaskFilter::new(MaskBuffer::filled(64, 64, 0.0), 64, 64, false).unwrap();
        let white = MaskFilter::new(MaskBuffer::filled(64, 64, 1.0), 64, 64, false).unwrap();
        let unfiltered = PoissonDiskSampler::generate(&s, &[]);
        let filtered = PoissonDiskSampler::generate(
            &s,
            &[CandidateFilter::Mask(black), CandidateFilter::Mask(white)],
        );
        assert_eq!(unfiltered, filtered);
    }
}
