//! Union of polygon rings on an integer grid.
//!
//! Rings are snap rounded and noded, the resulting edges are labelled with
//! the coverage on both sides, and the edges between covered and uncovered
//! area are traced back into polygons.

mod assemble;
mod graph;
mod grid;
mod snap_round;

pub(crate) use assemble::GridPolygon;
pub(crate) use grid::{GridPoint, MAX_GRID_COORDINATE};

use crate::errors::GeometryError;
use crate::Coordinate;
use graph::OverlayRing;
use log::trace;

/// An input ring in grid units, tagged with the polygon it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct InputRing {
    pub coords: Vec<Coordinate>,
    pub polygon: usize,
    pub is_shell: bool,
}

/// Union of the given polygons, each covering its shell minus its holes,
/// with every output vertex on the integer grid.
pub(crate) fn union_rings(rings: &[InputRing]) -> Result<Vec<GridPolygon>, GeometryError> {
    let coords: Vec<Vec<Coordinate>> = rings.iter().map(|r| r.coords.clone()).collect();
    let noded = snap_round::snap_round(&coords)?;
    let overlay_rings: Vec<OverlayRing> = noded
        .into_iter()
        .zip(rings)
        .map(|(points, ring)| OverlayRing {
            points,
            polygon: ring.polygon,
            is_shell: ring.is_shell,
        })
        .collect();
    let edges = graph::boundary_edges(&overlay_rings);
    trace!("tracing {} boundary edges", edges.len());
    assemble::assemble(&edges)
}
