use crate::{LinearRing, Rectangle};

/// One exterior ring and any number of holes. Holes are not checked for
/// containment here; see `algorithms::validate_polygon`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Polygon {
            exterior,
            interiors,
        }
    }

    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    /// Exterior first, then holes in order.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    pub fn envelope(&self) -> Rectangle {
        self.exterior.envelope()
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    pub fn area(&self) -> f64 {
        let holes: f64 = self.interiors.iter().map(|r| r.signed_area().abs()).sum();
        self.exterior.signed_area().abs() - holes
    }
}
