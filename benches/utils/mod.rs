pub mod other_impls;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use tile_geometry::{Coordinate, Rectangle};

//// Utility functions

/// A closed star-shaped ring of `n` vertices around `center`, with radii
/// drawn from `[radius / 2, radius]`. Simple, but rarely convex.
pub(crate) fn random_star_ring(center: Coordinate, radius: f64, n: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut coords: Vec<Coordinate> = (0..n)
        .map(|i| {
            let angle = 2. * PI * (i as f64) / (n as f64);
            let r = rng.gen_range(radius / 2., radius);
            center + Coordinate::new(r * angle.cos(), r * angle.sin())
        })
        .collect();
    coords.push(coords[0]);
    coords
}

/// A closed ring through `n` uniformly random vertices. Crosses itself
/// roughly `n²/10` times.
pub(crate) fn random_tangle_ring(rect: Rectangle, n: usize, seed: u64) -> Vec<Coordinate> {
    let mut coords = get_random_points(rect, n, seed);
    coords.push(coords[0]);
    coords
}

pub(crate) fn get_random_points(rect: Rectangle, n: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut results = Vec::new();
    for _i in 0..n {
        results.push(Coordinate::new(
            rng.gen_range(rect.x_min, rect.x_max),
            rng.gen_range(rect.y_min, rect.y_max),
        ));
    }

    results
}
