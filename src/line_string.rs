use crate::errors::ValidationError;
use crate::{Coordinate, LinearRing, Rectangle, SegRTree};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    coords: Vec<Coordinate>,
}

impl LineString {
    pub fn new(coords: Vec<Coordinate>) -> Self {
        LineString { coords }
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn into_coords(self) -> Vec<Coordinate> {
        self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn envelope(&self) -> Rectangle {
        Rectangle::of_coords(&self.coords)
    }

    pub fn rtree(&self) -> SegRTree {
        SegRTree::from_path(16, &self.coords)
    }

    pub fn is_closed(&self) -> bool {
        !self.coords.is_empty() && self.coords.first() == self.coords.last()
    }

    /// Reinterpret as a ring; it must be closed with at least 4 coordinates.
    pub fn into_ring(self) -> Result<LinearRing, ValidationError> {
        if self.coords.len() < 4 {
            Err(ValidationError::TooFewCoordinates(self.coords.len()))
        } else if !self.is_closed() {
            Err(ValidationError::NotClosed)
        } else {
            Ok(LinearRing::new(self.coords))
        }
    }
}

impl<IP: Into<Coordinate>> From<Vec<IP>> for LineString {
    fn from(coords: Vec<IP>) -> Self {
        LineString::new(coords.into_iter().map(|ip| ip.into()).collect())
    }
}
