//! Labels the noded edges with the polygon coverage on either side and keeps
//! the ones that separate covered area from uncovered area.

use super::grid::{envelope, GridPoint, IndexedGridRing};
use crate::{Coordinate, Rectangle, SegRTree};
use log::trace;
use std::collections::BTreeMap;

/// A noded ring together with the input polygon it came from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OverlayRing {
    pub points: Vec<GridPoint>,
    pub polygon: usize,
    pub is_shell: bool,
}

/// Net traversal count of an undirected edge by each ring, from its smaller
/// endpoint to its larger one.
type EdgeCounts = BTreeMap<(GridPoint, GridPoint), Vec<(usize, i32)>>;

fn count_edges(rings: &[OverlayRing]) -> EdgeCounts {
    let mut edges = EdgeCounts::new();
    for (ring_index, ring) in rings.iter().enumerate() {
        for w in ring.points.windows(2) {
            let (key, direction) = match w[0].cmp(&w[1]) {
                std::cmp::Ordering::Less => ((w[0], w[1]), 1),
                std::cmp::Ordering::Greater => ((w[1], w[0]), -1),
                std::cmp::Ordering::Equal => continue,
            };
            let counts = edges.entry(key).or_default();
            match counts.last_mut() {
                Some((last, count)) if *last == ring_index => *count += direction,
                _ => counts.push((ring_index, direction)),
            }
        }
    }
    edges
}

/// Coverage of one side of an edge, tracked per input polygon.
#[derive(Default)]
struct SideCoverage {
    polygons: Vec<(usize, bool, bool)>,
}

impl SideCoverage {
    fn add(&mut self, polygon: usize, is_shell: bool, inside: bool) {
        let index = match self.polygons.iter().position(|(p, _, _)| *p == polygon) {
            Some(index) => index,
            None => {
                self.polygons.push((polygon, false, false));
                self.polygons.len() - 1
            }
        };
        let entry = &mut self.polygons[index];
        if is_shell {
            entry.1 |= inside;
        } else {
            entry.2 |= inside;
        }
    }

    fn covered(&self) -> bool {
        self.polygons.iter().any(|&(_, shell, hole)| shell && !hole)
    }
}

/// Directed edges of the union boundary, each with the covered area on its
/// left, sorted.
///
/// Each distinct edge is sampled once at its midpoint. The winding number
/// there is exact and belongs to one side of the edge; the other side
/// differs by the net number of times the ring runs along the edge.
pub(crate) fn boundary_edges(rings: &[OverlayRing]) -> Vec<(GridPoint, GridPoint)> {
    let edges = count_edges(rings);
    let indexed: Vec<IndexedGridRing> = rings.iter().map(|r| IndexedGridRing::new(&r.points)).collect();
    let envelopes: Vec<Rectangle> = rings.iter().map(|r| envelope(&r.points)).collect();
    let ring_index = SegRTree::new_loaded(16, &envelopes);

    let mut boundary = Vec::new();
    for (&(a, b), counts) in &edges {
        let midpoint = a + b;
        // The half-open crossing rule assigns the midpoint to the +x side of a
        // non-horizontal edge and to the +y side of a horizontal one. Since
        // a < b, that is the left side exactly when dy <= 0.
        let midpoint_is_left = b.y - a.y <= 0;
        let mut left = SideCoverage::default();
        let mut right = SideCoverage::default();
        let point = Coordinate::new(midpoint.x as f64 / 2., midpoint.y as f64 / 2.);
        for ring in ring_index.query_point(point) {
            let wn = indexed[ring].winding_number_doubled(midpoint);
            let along = counts
                .iter()
                .find(|(r, _)| *r == ring)
                .map_or(0, |&(_, count)| count);
            let (wl, wr) = if midpoint_is_left { (wn, wn - along) } else { (wn + along, wn) };
            let OverlayRing { polygon, is_shell, .. } = rings[ring];
            left.add(polygon, is_shell, wl != 0);
            right.add(polygon, is_shell, wr != 0);
        }
        match (left.covered(), right.covered()) {
            (true, false) => boundary.push((a, b)),
            (false, true) => boundary.push((b, a)),
            _ => {}
        }
    }
    trace!("{} of {} distinct edges are on the boundary", boundary.len(), edges.len());
    boundary.sort();
    boundary
}
