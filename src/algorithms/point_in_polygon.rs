use crate::errors::ValidationError;
use crate::{Coordinate, LinearRing, Polygon, SegRTree};

/// Whether `point` has a non-zero winding number with respect to `ring`.
/// Points on the boundary may land on either side.
pub fn point_in_ring(point: Coordinate, ring: &LinearRing) -> Result<bool, ValidationError> {
    let coords = ring.coords();
    if coords.len() < 4 {
        return Err(ValidationError::TooFewCoordinates(coords.len()));
    }
    if !ring.is_closed() {
        return Err(ValidationError::NotClosed);
    }
    Ok(ring.rtree().winding_number(point, coords) != 0)
}

/// Inside the exterior and outside every hole.
pub fn point_in_polygon(point: Coordinate, polygon: &Polygon) -> Result<bool, ValidationError> {
    if !point_in_ring(point, polygon.exterior())? {
        return Ok(false);
    }
    for hole in polygon.interiors() {
        if point_in_ring(point, hole)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A ring's coordinates together with the index over its segments, for
/// answering many queries against the same ring.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRing {
    coords: Vec<Coordinate>,
    rtree: SegRTree,
}

impl PreparedRing {
    pub(crate) fn new(coords: Vec<Coordinate>) -> Self {
        let rtree = SegRTree::from_path(16, &coords);
        PreparedRing { coords, rtree }
    }

    pub(crate) fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub(crate) fn rtree(&self) -> &SegRTree {
        &self.rtree
    }

    pub(crate) fn contains(&self, point: Coordinate) -> bool {
        self.rtree.winding_number(point, &self.coords) != 0
    }
}
