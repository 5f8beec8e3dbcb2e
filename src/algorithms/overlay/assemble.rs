//! Traces boundary edges into rings and groups them into polygons.

use super::grid::{compare_angle, envelope, twice_signed_area, GridPoint, IndexedGridRing};
use crate::errors::GeometryError;
use crate::{Coordinate, Rectangle, SegRTree};
use log::trace;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// A polygon on the grid: counter-clockwise shell, clockwise holes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridPolygon {
    pub shell: Vec<GridPoint>,
    pub holes: Vec<Vec<GridPoint>>,
}

/// Assemble directed boundary edges, covered side on the left, into
/// polygons. Edges must be sorted, as `graph::boundary_edges` returns them.
pub(crate) fn assemble(edges: &[(GridPoint, GridPoint)]) -> Result<Vec<GridPolygon>, GeometryError> {
    let mut shells: Vec<(i128, Vec<GridPoint>)> = Vec::new();
    let mut holes: Vec<Vec<GridPoint>> = Vec::new();
    for ring in trace_rings(edges)? {
        let area = twice_signed_area(&ring);
        match area.cmp(&0) {
            Ordering::Greater => shells.push((area, ring)),
            Ordering::Less => holes.push(ring),
            Ordering::Equal => trace!("dropping zero-area ring of {} points", ring.len()),
        }
    }
    trace!("assembled {} shells and {} holes", shells.len(), holes.len());

    let owners = assign_holes(&shells, &holes)?;
    let mut polygons: Vec<GridPolygon> = shells
        .into_iter()
        .map(|(_, shell)| GridPolygon { shell, holes: Vec::new() })
        .collect();
    for (hole, owner) in holes.into_iter().zip(owners) {
        polygons[owner].holes.push(hole);
    }
    Ok(polygons)
}

/// Follow the edges into closed walks, turning as sharply left as possible
/// at each vertex, then split every walk where it revisits a vertex.
fn trace_rings(edges: &[(GridPoint, GridPoint)]) -> Result<Vec<Vec<GridPoint>>, GeometryError> {
    let mut outgoing: HashMap<GridPoint, Vec<GridPoint>> = HashMap::new();
    for &(from, to) in edges {
        outgoing.entry(from).or_default().push(to);
    }
    for (&vertex, targets) in outgoing.iter_mut() {
        targets.sort_by(|&a, &b| compare_angle(a - vertex, b - vertex));
    }

    let mut used: HashSet<(GridPoint, GridPoint)> = HashSet::with_capacity(edges.len());
    let mut rings = Vec::new();
    for &start in edges {
        if used.contains(&start) {
            continue;
        }
        let mut walk = vec![start.0];
        let (mut from, mut to) = start;
        loop {
            if !used.insert((from, to)) {
                return Err(GeometryError::invalid(
                    "snap_and_fix_ring_tracing",
                    format!("edge {:?} -> {:?} reached twice", from, to),
                ));
            }
            walk.push(to);
            let next = next_edge(&outgoing, from, to)?;
            if (to, next) == start {
                break;
            }
            from = to;
            to = next;
        }
        split_at_repeated_vertices(&walk, &mut rings);
    }
    Ok(rings)
}

/// The outgoing edge at `vertex` that comes first clockwise from the
/// reversed incoming edge.
fn next_edge(
    outgoing: &HashMap<GridPoint, Vec<GridPoint>>,
    from: GridPoint,
    vertex: GridPoint,
) -> Result<GridPoint, GeometryError> {
    let targets = outgoing.get(&vertex).filter(|t| !t.is_empty()).ok_or_else(|| {
        GeometryError::invalid(
            "snap_and_fix_ring_tracing",
            format!("no edge leaves {:?}", vertex),
        )
    })?;
    let back = from - vertex;
    let next = targets
        .iter()
        .rev()
        .find(|&&t| compare_angle(t - vertex, back) == Ordering::Less)
        .or_else(|| targets.last())
        .copied();
    next.ok_or_else(|| GeometryError::invalid("snap_and_fix_ring_tracing", "no outgoing edge"))
}

/// Cut a closed walk into simple closed rings at every repeated vertex.
fn split_at_repeated_vertices(walk: &[GridPoint], rings: &mut Vec<Vec<GridPoint>>) {
    let mut stack: Vec<GridPoint> = Vec::with_capacity(walk.len());
    let mut position: HashMap<GridPoint, usize> = HashMap::new();
    for &vertex in walk {
        match position.get(&vertex) {
            Some(&index) => {
                let mut ring = stack.split_off(index);
                for visited in &ring[1..] {
                    position.remove(visited);
                }
                ring.push(vertex);
                rings.push(ring);
                stack.push(vertex);
            }
            None => {
                position.insert(vertex, stack.len());
                stack.push(vertex);
            }
        }
    }
}

/// Index of the smallest shell around each hole.
fn assign_holes(
    shells: &[(i128, Vec<GridPoint>)],
    holes: &[Vec<GridPoint>],
) -> Result<Vec<usize>, GeometryError> {
    if holes.is_empty() {
        return Ok(Vec::new());
    }
    let indexed: Vec<IndexedGridRing> = shells.iter().map(|(_, s)| IndexedGridRing::new(s)).collect();
    let envelopes: Vec<Rectangle> = shells.iter().map(|(_, s)| envelope(s)).collect();
    let shell_index = SegRTree::new_loaded(16, &envelopes);

    let mut owners = Vec::with_capacity(holes.len());
    for hole in holes {
        // A hole edge never lies on its shell, so its midpoint is strictly
        // inside or strictly outside every shell.
        let midpoint = hole[0] + hole[1];
        let point = Coordinate::new(midpoint.x as f64 / 2., midpoint.y as f64 / 2.);
        let owner = shell_index
            .query_point(point)
            .into_iter()
            .filter(|&s| indexed[s].winding_number_doubled(midpoint) != 0)
            .min_by_key(|&s| (shells[s].0, s))
            .ok_or_else(|| {
                GeometryError::invalid(
                    "snap_and_fix_orphan_hole",
                    format!("hole starting at {:?} has no shell", hole[0]),
                )
            })?;
        owners.push(owner);
    }
    Ok(owners)
}
