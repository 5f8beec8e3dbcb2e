use crate::{Coordinate, Rectangle};

pub(crate) fn rectangles_from_coordinates(coords: &[Coordinate]) -> Vec<Rectangle> {
    coords
        .windows(2)
        .map(|c| Rectangle::new(c[0], c[1]))
        .collect()
}

pub(crate) fn calculate_level_indices(degree: usize, num_items: usize) -> Vec<usize> {
    let mut level_indices: Vec<usize> = vec![0];

    let mut level = 0;
    let mut level_size = num_items;

    while level_size > 1 {
        let level_buffer = if level_size % degree > 0 { 1 } else { 0 };
        // least multiple of degree >= level_size
        let level_capacity = degree * (level_size / degree + level_buffer);
        level_indices.push(level_indices[level] + level_capacity);
        level += 1;
        level_size = level_capacity / degree;
    }
    level_indices
}

/// Contribution of the segment start->end to the winding number of `point`.
/// Upward crossings with the point strictly left count +1, downward
/// crossings with the point strictly right count -1.
pub fn winding_number(point: Coordinate, start: Coordinate, end: Coordinate) -> i32 {
    // Calculate the two halves of the cross-product (= lx - rx)
    let lx = (end.x - start.x) * (point.y - start.y);
    let rx = (end.y - start.y) * (point.x - start.x);

    if start.y <= point.y {
        // Upward crossing
        if end.y > point.y && lx > rx {
            return 1;
        }
    } else {
        // Downward crossing
        if end.y <= point.y && lx < rx {
            return -1;
        }
    }
    0
}

/// Check the intersection of two segments A and B.  Returns the shared
/// sub-segment, which is degenerate when they meet at a single point.
///
/// NB: This does not do an initial check with Envelopes; the caller should do that.
pub(crate) fn intersect_segments(
    start_a: Coordinate,
    end_a: Coordinate,
    start_b: Coordinate,
    end_b: Coordinate,
) -> Option<(Coordinate, Coordinate)> {
    if (start_a == start_b && end_a == end_b) || (start_a == end_b && end_a == start_b) {
        return Some((start_a, end_a));
    }

    let da = end_a - start_a; // The vector for segment A
    let db = end_b - start_b; // The vector for segment B
    let offset = start_b - start_a; // The offset between segments (starts)

    let da_x_db = da.cross(db);
    let offset_x_da = offset.cross(da);

    if da_x_db == 0. {
        // Parallel: disjoint unless the offset is also parallel.
        if offset_x_da != 0. {
            return None;
        }
        let da_2 = da.dot(da);
        if da_2 == 0. {
            return None;
        }
        // Both ends of B, in units of da from start_a, with their exact coordinates.
        let tb0 = (start_b - start_a).dot(da) / da_2;
        let tb1 = (end_b - start_a).dot(da) / da_2;
        let (low, high) = if tb0 <= tb1 {
            ((tb0, start_b), (tb1, end_b))
        } else {
            ((tb1, end_b), (tb0, start_b))
        };
        // Segments that only share an endpoint meet there exactly, whatever
        // rounding did to the parameters.
        if low.1 == end_a {
            return Some((end_a, end_a));
        }
        if high.1 == start_a {
            return Some((start_a, start_a));
        }
        if low.0 > 1. || high.0 < 0. {
            return None;
        }
        // The overlap always starts and ends at input endpoints.
        let start = if low.0 <= 0. { start_a } else { low.1 };
        let end = if high.0 >= 1. { end_a } else { high.1 };
        Some((start, end))
    } else {
        // Not parallel: the infinite lines meet once; check it is on both segments.
        for &shared in &[start_a, end_a] {
            if shared == start_b || shared == end_b {
                return Some((shared, shared));
            }
        }
        let ta = offset.cross(db) / da_x_db;
        let tb = offset_x_da / da_x_db;
        if (0. ..=1.).contains(&ta) && (0. ..=1.).contains(&tb) {
            let intersection = if ta == 0. {
                start_a
            } else if ta == 1. {
                end_a
            } else if tb == 0. {
                start_b
            } else if tb == 1. {
                end_b
            } else {
                start_a + da * ta
            };
            return Some((intersection, intersection));
        }
        None
    }
}
