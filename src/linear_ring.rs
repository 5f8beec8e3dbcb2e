use crate::{Coordinate, LineString, Rectangle, SegRTree};

/// A closed coordinate sequence. Construction does not validate, since rings
/// handed to the topology fixer are frequently invalid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearRing {
    coords: Vec<Coordinate>,
}

impl LinearRing {
    pub fn new(coords: Vec<Coordinate>) -> Self {
        LinearRing { coords }
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

    pub fn is_closed(&self) -> bool {
        !self.coords.is_empty() && self.coords.first() == self.coords.last()
    }

    pub fn envelope(&self) -> Rectangle {
        Rectangle::of_coords(&self.coords)
    }

    pub fn rtree(&self) -> SegRTree {
        SegRTree::from_path(16, &self.coords)
    }

    /// The vertices with consecutive duplicates and the closing coordinate
    /// dropped.
    pub fn distinct_vertices(&self) -> Vec<Coordinate> {
        let mut vertices: Vec<Coordinate> = Vec::with_capacity(self.coords.len());
        for &coord in &self.coords {
            if vertices.last() != Some(&coord) {
                vertices.push(coord);
            }
        }
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        vertices
    }

    pub fn distinct_len(&self) -> usize {
        self.distinct_vertices().len()
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        if self.coords.len() < 3 {
            return 0.;
        }
        let origin = self.coords[0];
        let twice_area: f64 = self
            .coords
            .windows(2)
            .map(|w| (w[0] - origin).cross(w[1] - origin))
            .sum();
        twice_area / 2.
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.
    }

    pub fn reversed(&self) -> LinearRing {
        LinearRing::new(self.coords.iter().rev().copied().collect())
    }

    pub fn to_line_string(&self) -> LineString {
        LineString::new(self.coords.clone())
    }
}

impl<IP: Into<Coordinate>> From<Vec<IP>> for LinearRing {
    fn from(coords: Vec<IP>) -> Self {
        LinearRing::new(coords.into_iter().map(|ip| ip.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_area() {
        let ccw = LinearRing::from(vec![(0., 0.), (2., 0.), (2., 2.), (0., 2.), (0., 0.)]);
        assert_eq!(ccw.signed_area(), 4.);
        assert!(ccw.is_ccw());
        assert_eq!(ccw.reversed().signed_area(), -4.);
        assert!(!ccw.reversed().is_ccw());
    }

    #[test]
    fn test_distinct_len() {
        let ring = LinearRing::from(vec![
            (0., 0.),
            (0., 0.),
            (1., 0.),
            (1., 1.),
            (1., 1.),
            (0., 0.),
        ]);
        assert_eq!(ring.distinct_len(), 3);
        assert_eq!(
            ring.distinct_vertices(),
            vec![(0., 0.).into(), (1., 0.).into(), (1., 1.).into()]
        );
        assert_eq!(LinearRing::from(vec![(0., 0.), (0., 0.)]).distinct_len(), 1);
        assert_eq!(LinearRing::default().distinct_len(), 0);
    }
}
