use centroid_tracker::{BoundingBox, CentroidTracker, Matching};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_pcg::Pcg32;

/// Returns `frames` frames of `objects` boxes drifting across a 640x480 image.
fn sequence(objects: usize, frames: usize) -> Vec<Vec<BoundingBox>> {
    let mut rng = Pcg32::seed_from_u64(0);
    let mut positions = (0..objects)
        .map(|_| (rng.gen_range(0.0..640.0_f32), rng.gen_range(0.0..480.0_f32)))
        .collect::<Vec<_>>();

    (0..frames)
        .map(|_| {
            positions
                .iter_mut()
                .map(|(x, y)| {
                    *x = (*x + rng.gen_range(-2.0..2.0)).clamp(0.0, 640.0);
                    *y = (*y + rng.gen_range(-2.0..2.0)).clamp(0.0, 480.0);
                    BoundingBox::from_tlwh(*x, *y, 20.0, 40.0)
                })
                .collect()
        })
        .collect()
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for objects in [10, 50, 200] {
        let frames = sequence(objects, 100);
        for matching in [Matching::Greedy, Matching::Optimal] {
            group.bench_with_input(
                BenchmarkId::new(matching.to_string(), objects),
                &frames,
                |b, frames| {
                    b.iter(|| {
                        let mut tracker = CentroidTracker::new(30);
                        tracker.with_matching(matching);
                        frames.iter().for_each(|bboxes| {
                            black_box(tracker.update(bboxes));
                        });
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
