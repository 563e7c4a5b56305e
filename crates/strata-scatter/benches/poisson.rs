use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec2;
use strata_scatter::{
    CandidateFilter, MaskFilter, MaskShape, PoissonDiskSampler, SamplerSettings,
};

fn bench_unfiltered(c: &mut Criterion) {
    let settings = SamplerSettings {
        radius: 2.0,
        region_size: Vec2::new(256.0, 256.0),
        seed: 7,
        ..Default::default()
    };
    c.bench_function("poisson_256_r2", |b| {
        b.iter(|| PoissonDiskSampler::generate(black_box(&settings), &[]))
    });
}

fn bench_masked(c: &mut Criterion) {
    let settings = SamplerSettings {
        radius: 2.0,
        region_size: Vec2::new(256.0, 256.0),
        seed: 7,
        ..Default::default()
    };
    let mask = MaskShape::LinearCircle { falloff: 2.0 }.generate(256, 256, false, None);
    let filters = match MaskFilter::new(mask, 256, 256, false) {
        Ok(filter) => vec![CandidateFilter::Mask(filter)],
        Err(_) => Vec::new(),
    };
    c.bench_function("poisson_256_r2_masked", |b| {
        b.iter(|| PoissonDiskSampler::generate(black_box(&settings), &filters))
    });
}

fn bench_mask_shapes(c: &mut Criterion) {
    c.bench_function("mask_triangle_grid_256", |b| {
        b.iter(|| {
            MaskShape::CircleTriangleGrid {
                diameter: 8,
                spacing: 4,
            }
            .generate(256, 256, false, black_box(Some(15.0)))
        })
    });
}

criterion_group!(benches, bench_unfiltered, bench_masked, bench_mask_shapes);
criterion_main!(benches);
