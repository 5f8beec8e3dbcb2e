mod utils;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tile_geometry::{snap_and_fix_polygon, Coordinate, Geometry, LinearRing, Polygon, PrecisionModel, Rectangle};
use utils::{random_star_ring, random_tangle_ring};

fn polygon(coords: Vec<Coordinate>) -> Geometry {
    Geometry::Polygon(Polygon::new(LinearRing::new(coords), vec![]))
}

pub fn snap_and_fix_benchmark(c: &mut Criterion) {
    let precision = PrecisionModel::default();
    let mut group = c.benchmark_group("snap_and_fix");

    for &size in [100usize, 1000, 10000].iter() {
        let star = polygon(random_star_ring(Coordinate::new(128., 128.), 120., size, 7));
        group.bench_with_input(BenchmarkId::new("simple_star", size), &star, |b, g| {
            b.iter(|| black_box(snap_and_fix_polygon(g, &precision)).unwrap())
        });
    }

    let tile = Rectangle::new(Coordinate::new(0., 0.), Coordinate::new(256., 256.));
    for &size in [20usize, 80, 320].iter() {
        let tangle = polygon(random_tangle_ring(tile, size, 11));
        group.bench_with_input(BenchmarkId::new("self_crossing", size), &tangle, |b, g| {
            b.iter(|| black_box(snap_and_fix_polygon(g, &precision)).unwrap())
        });
    }

    let overlapping: Vec<Polygon> = (0..50)
        .map(|i| {
            let coords = random_star_ring(Coordinate::new(128., 128.), 120. - 2. * i as f64, 200, i);
            Polygon::new(LinearRing::new(coords), vec![])
        })
        .collect();
    let overlapping = Geometry::MultiPolygon(overlapping);
    group.bench_function("overlapping_shells_50", |b| {
        b.iter(|| black_box(snap_and_fix_polygon(&overlapping, &precision)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, snap_and_fix_benchmark);
criterion_main!(benches);
