//! Snap-rounding noder.
//!
//! Every vertex and every intersection between two input segments marks a
//! "hot pixel" on the integer grid. Each segment is replaced by the chain of
//! hot pixel centers it passes through, which leaves segments that can only
//! meet at shared grid vertices. An exact integer pass then splits segments
//! at vertices lying on them, and re-rounds any crossing that float error
//! let through, until nothing is left to node.

use super::grid::{div_round, orientation, strictly_between, GridPoint};
use crate::errors::GeometryError;
use crate::utils::intersect_segments;
use crate::{Coordinate, Rectangle, SegRTree};
use log::trace;
use std::collections::{BTreeSet, HashMap};

/// Bound on exact noding passes; snap rounding normally leaves nothing for
/// a second pass to do.
const MAX_NODING_ROUNDS: usize = 32;

const RTREE_DEGREE: usize = 16;

/// Snap closed rings given in grid units onto the integer grid and node
/// them against each other. Output rings keep their input positions; a ring
/// that collapses comes back with fewer than four points.
pub(crate) fn snap_round(rings: &[Vec<Coordinate>]) -> Result<Vec<Vec<GridPoint>>, GeometryError> {
    let pixels = hot_pixels(rings);
    trace!("snap rounding {} rings through {} hot pixels", rings.len(), pixels.len());
    let snapped = reroute_through_pixels(rings, &pixels);
    node_exactly(snapped)
}

/// Indices of every segment of every ring, with their envelopes.
fn segments<T, F>(rings: &[Vec<T>], envelope: F) -> (Vec<(usize, usize)>, Vec<Rectangle>)
where
    T: Copy,
    F: Fn(T, T) -> Rectangle,
{
    let mut refs = Vec::new();
    let mut rects = Vec::new();
    for (ring_index, ring) in rings.iter().enumerate() {
        for (index, w) in ring.windows(2).enumerate() {
            refs.push((ring_index, index));
            rects.push(envelope(w[0], w[1]));
        }
    }
    (refs, rects)
}

/// Rounded vertices plus rounded pairwise segment intersections, sorted.
pub(crate) fn hot_pixels(rings: &[Vec<Coordinate>]) -> Vec<GridPoint> {
    let mut pixels: BTreeSet<GridPoint> = rings
        .iter()
        .flat_map(|ring| ring.iter().map(|&c| GridPoint::round(c)))
        .collect();

    let (refs, rects) = segments(rings, Rectangle::new);
    let rtree = SegRTree::new_loaded(RTREE_DEGREE, &rects);
    for (i, j) in rtree.query_self_intersections() {
        let (ring_a, a) = refs[i];
        let (ring_b, b) = refs[j];
        let (start_a, end_a) = (rings[ring_a][a], rings[ring_a][a + 1]);
        let (start_b, end_b) = (rings[ring_b][b], rings[ring_b][b + 1]);
        if let Some((start, end)) = intersect_segments(start_a, end_a, start_b, end_b) {
            pixels.insert(GridPoint::round(start));
            pixels.insert(GridPoint::round(end));
        }
    }
    pixels.into_iter().collect()
}

/// Whether segment p-q passes through the half-open unit pixel centered on
/// `pixel`, which owns its bottom and left edges but not its top or right.
pub(crate) fn segment_hits_pixel(pixel: GridPoint, p: Coordinate, q: Coordinate) -> bool {
    let x_min = pixel.x as f64 - 0.5;
    let x_max = pixel.x as f64 + 0.5;
    let y_min = pixel.y as f64 - 0.5;
    let y_max = pixel.y as f64 + 0.5;
    let d = q - p;

    // Liang-Barsky clip against the closed pixel.
    let mut t0 = 0f64;
    let mut t1 = 1f64;
    let bounds = [
        (-d.x, p.x - x_min),
        (d.x, x_max - p.x),
        (-d.y, p.y - y_min),
        (d.y, y_max - p.y),
    ];
    for &(denominator, numerator) in bounds.iter() {
        if denominator == 0. {
            if numerator < 0. {
                return false;
            }
            continue;
        }
        let r = numerator / denominator;
        if denominator < 0. {
            if r > t1 {
                return false;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return false;
            }
            t1 = t1.min(r);
        }
    }

    // The clipped part must reach inside the open top and right edges. The
    // conditions are linear in t, so its ends and middle decide.
    let owned = |t: f64| {
        let c = p + d * t;
        c.x < x_max && c.y < y_max
    };
    owned(t0) || owned(t1) || owned((t0 + t1) / 2.)
}

/// Replace each segment by the chain of hot pixels it passes through.
fn reroute_through_pixels(rings: &[Vec<Coordinate>], pixels: &[GridPoint]) -> Vec<Vec<GridPoint>> {
    let pixel_rects: Vec<Rectangle> = pixels
        .iter()
        .map(|p| {
            let center = p.to_coordinate();
            Rectangle::new(
                center - Coordinate::new(0.5, 0.5),
                center + Coordinate::new(0.5, 0.5),
            )
        })
        .collect();
    let pixel_index = SegRTree::new_loaded(RTREE_DEGREE, &pixel_rects);

    let mut snapped = Vec::with_capacity(rings.len());
    for ring in rings {
        let mut out: Vec<GridPoint> = Vec::with_capacity(ring.len());
        for w in ring.windows(2) {
            let (p, q) = (w[0], w[1]);
            let (start, end) = (GridPoint::round(p), GridPoint::round(q));
            out.push(start);
            let d = q - p;
            let mut hits: Vec<(f64, GridPoint)> = pixel_index
                .query_rect(Rectangle::new(p, q))
                .into_iter()
                .map(|i| pixels[i])
                .filter(|&pixel| pixel != start && pixel != end)
                .filter(|&pixel| segment_hits_pixel(pixel, p, q))
                .map(|pixel| ((pixel.to_coordinate() - p).dot(d), pixel))
                .collect();
            hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            out.extend(hits.into_iter().map(|(_, pixel)| pixel));
        }
        if let Some(&last) = ring.last() {
            out.push(GridPoint::round(last));
        }
        out.dedup();
        snapped.push(out);
    }
    snapped
}

/// Split segments at every vertex that lies in their interior, and re-round
/// any proper crossing, until the rings only meet at shared vertices.
pub(crate) fn node_exactly(
    mut rings: Vec<Vec<GridPoint>>,
) -> Result<Vec<Vec<GridPoint>>, GeometryError> {
    for round in 0..MAX_NODING_ROUNDS {
        let (refs, rects) = segments(&rings, |a: GridPoint, b: GridPoint| {
            Rectangle::new(a.to_coordinate(), b.to_coordinate())
        });
        if refs.is_empty() {
            return Ok(rings);
        }
        let rtree = SegRTree::new_loaded(RTREE_DEGREE, &rects);

        let mut splits: HashMap<(usize, usize), Vec<GridPoint>> = HashMap::new();
        let mut crossings = 0;
        for (i, j) in rtree.query_self_intersections() {
            let (ring_a, a) = refs[i];
            let (ring_b, b) = refs[j];
            let (a1, a2) = (rings[ring_a][a], rings[ring_a][a + 1]);
            let (b1, b2) = (rings[ring_b][b], rings[ring_b][b + 1]);
            let o1 = orientation(a1, a2, b1).signum();
            let o2 = orientation(a1, a2, b2).signum();
            let o3 = orientation(b1, b2, a1).signum();
            let o4 = orientation(b1, b2, a2).signum();

            if o1 * o2 < 0 && o3 * o4 < 0 {
                let node = rounded_crossing(a1, a2, b1, b2);
                splits.entry(refs[i]).or_default().push(node);
                splits.entry(refs[j]).or_default().push(node);
                crossings += 1;
                continue;
            }
            for &(o, point) in &[(o1, b1), (o2, b2)] {
                if o == 0 && strictly_between(a1, a2, point) {
                    splits.entry(refs[i]).or_default().push(point);
                }
            }
            for &(o, point) in &[(o3, a1), (o4, a2)] {
                if o == 0 && strictly_between(b1, b2, point) {
                    splits.entry(refs[j]).or_default().push(point);
                }
            }
        }

        if splits.is_empty() {
            return Ok(rings);
        }
        trace!(
            "noding round {}: {} segments split, {} crossings re-rounded",
            round,
            splits.len(),
            crossings
        );
        rings = apply_splits(&rings, &splits);
    }

    Err(GeometryError::invalid(
        "snap_and_fix_noding_failed",
        format!("noding did not converge after {} rounds", MAX_NODING_ROUNDS),
    ))
}

/// Intersection of two properly crossing segments, rounded to the grid.
fn rounded_crossing(a1: GridPoint, a2: GridPoint, b1: GridPoint, b2: GridPoint) -> GridPoint {
    let da = a2 - a1;
    let db = b2 - b1;
    let mut numerator = (b1 - a1).cross(db);
    let mut denominator = da.cross(db);
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }
    let x = div_round(a1.x as i128 * denominator + da.x as i128 * numerator, denominator);
    let y = div_round(a1.y as i128 * denominator + da.y as i128 * numerator, denominator);
    GridPoint::new(x as i64, y as i64)
}

fn apply_splits(
    rings: &[Vec<GridPoint>],
    splits: &HashMap<(usize, usize), Vec<GridPoint>>,
) -> Vec<Vec<GridPoint>> {
    let mut result = Vec::with_capacity(rings.len());
    for (ring_index, ring) in rings.iter().enumerate() {
        let mut out = Vec::with_capacity(ring.len());
        for (index, w) in ring.windows(2).enumerate() {
            let (start, end) = (w[0], w[1]);
            out.push(start);
            if let Some(points) = splits.get(&(ring_index, index)) {
                let d = end - start;
                let mut points: Vec<GridPoint> = points
                    .iter()
                    .copied()
                    .filter(|&p| p != start && p != end)
                    .collect();
                points.sort_by_key(|&p| (p - start).dot(d));
                out.extend(points);
            }
        }
        if let Some(&last) = ring.last() {
            out.push(last);
        }
        out.dedup();
        result.push(out);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> GridPoint {
        GridPoint::new(x, y)
    }

    fn ring(coords: &[(f64, f64)]) -> Vec<Coordinate> {
        coords.iter().map(|&c| c.into()).collect()
    }

    #[test]
    fn test_segment_hits_pixel() {
        let pixel = p(0, 0);
        assert!(segment_hits_pixel(pixel, (-1., 0.).into(), (1., 0.).into()));
        assert!(segment_hits_pixel(pixel, (-1., -1.).into(), (1., 1.).into()));
        // Bottom and left edges belong to the pixel.
        assert!(segment_hits_pixel(pixel, (-1., -0.5).into(), (1., -0.5).into()));
        assert!(segment_hits_pixel(pixel, (-0.5, -1.).into(), (-0.5, 1.).into()));
        // Top and right edges do not.
        assert!(!segment_hits_pixel(pixel, (-1., 0.5).into(), (1., 0.5).into()));
        assert!(!segment_hits_pixel(pixel, (0.5, -1.).into(), (0.5, 1.).into()));
        assert!(!segment_hits_pixel(pixel, (1., 0.).into(), (2., 0.).into()));
    }

    #[test]
    fn test_crossing_becomes_shared_vertex() {
        let rings = vec![
            ring(&[(0., 0.), (10., 10.), (10., 0.), (0., 0.)]),
            ring(&[(0., 10.4), (10., 0.4), (10., 10.4), (0., 10.4)]),
        ];
        let noded = snap_round(&rings).unwrap();
        assert_eq!(noded.len(), 2);
        let crossing = p(5, 5);
        assert!(noded[0].contains(&crossing));
        assert!(noded[1].contains(&crossing));
    }

    #[test]
    fn test_segment_snaps_to_nearby_vertex() {
        // The second ring's corner sits 0.2 above the first ring's bottom edge.
        let rings = vec![
            ring(&[(0., 0.), (10., 0.), (10., 10.), (0., 0.)]),
            ring(&[(5., 0.2), (6., 3.), (4., 3.), (5., 0.2)]),
        ];
        let noded = snap_round(&rings).unwrap();
        assert_eq!(
            noded[0],
            vec![p(0, 0), p(5, 0), p(10, 0), p(10, 10), p(0, 0)]
        );
        assert_eq!(noded[1][0], p(5, 0));
    }

    #[test]
    fn test_collapsed_ring_keeps_its_place() {
        let rings = vec![ring(&[(0., 0.), (0.2, 0.), (0.2, 0.2), (0., 0.)])];
        assert_eq!(snap_round(&rings).unwrap(), vec![vec![p(0, 0)]]);
    }

    #[test]
    fn test_node_exactly_splits_t_junction_and_overlap() {
        let rings = vec![
            vec![p(0, 0), p(4, 0), p(4, 4), p(0, 4), p(0, 0)],
            vec![p(2, 0), p(3, 2), p(1, 2), p(2, 0)],
            vec![p(1, 0), p(3, 0), p(2, -1), p(1, 0)],
        ];
        let noded = node_exactly(rings).unwrap();
        assert_eq!(
            noded[0],
            vec![
                p(0, 0),
                p(1, 0),
                p(2, 0),
                p(3, 0),
                p(4, 0),
                p(4, 4),
                p(0, 4),
                p(0, 0)
            ]
        );
        assert_eq!(noded[1], vec![p(2, 0), p(3, 2), p(1, 2), p(2, 0)]);
        assert_eq!(noded[2], vec![p(1, 0), p(2, 0), p(3, 0), p(2, -1), p(1, 0)]);
    }

    #[test]
    fn test_node_exactly_rounds_crossings() {
        let rings = vec![
            vec![p(0, 0), p(3, 1), p(3, 0), p(0, 0)],
            vec![p(0, 1), p(3, 0), p(0, -1), p(0, 1)],
        ];
        let noded = node_exactly(rings).unwrap();
        // Every pair of segments now meets only at shared vertices.
        let (refs, _) = segments(&noded, |a: GridPoint, b: GridPoint| {
            Rectangle::new(a.to_coordinate(), b.to_coordinate())
        });
        for &(ra, a) in &refs {
            for &(rb, b) in &refs {
                let (a1, a2) = (noded[ra][a], noded[ra][a + 1]);
                let (b1, b2) = (noded[rb][b], noded[rb][b + 1]);
                let proper = orientation(a1, a2, b1).signum() * orientation(a1, a2, b2).signum()
                    < 0
                    && orientation(b1, b2, a1).signum() * orientation(b1, b2, a2).signum() < 0;
                assert!(!proper, "{:?}-{:?} crosses {:?}-{:?}", a1, a2, b1, b2);
            }
        }
    }
}
