use crate::algorithms::validate_geometry;
use crate::errors::ValidationError;
use crate::{Coordinate, LineString, LinearRing, Polygon};

/// The closed set of geometry kinds the kernel works with.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
    MultiLineString(Vec<LineString>),
    GeometryCollection(Vec<Geometry>),
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::empty()
    }
}

impl Geometry {
    /// The designated empty geometry: a collection with no children.
    pub fn empty() -> Self {
        Geometry::GeometryCollection(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(ls) => ls.is_empty(),
            Geometry::LinearRing(ring) => ring.is_empty(),
            Geometry::Polygon(polygon) => polygon.is_empty(),
            Geometry::MultiPolygon(polygons) => polygons.iter().all(Polygon::is_empty),
            Geometry::MultiLineString(lines) => lines.iter().all(LineString::is_empty),
            Geometry::GeometryCollection(children) => children.iter().all(Geometry::is_empty),
        }
    }

    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Rebuild the geometry with every coordinate passed through `f`.
    pub fn map_coords<F>(&self, f: &F) -> Geometry
    where
        F: Fn(Coordinate) -> Coordinate,
    {
        let map = |coords: &[Coordinate]| -> Vec<Coordinate> {
            coords.iter().map(|&c| f(c)).collect()
        };
        let map_ring = |ring: &LinearRing| LinearRing::new(map(ring.coords()));
        let map_polygon = |polygon: &Polygon| {
            Polygon::new(
                map_ring(polygon.exterior()),
                polygon.interiors().iter().map(map_ring).collect(),
            )
        };
        match self {
            Geometry::Point(c) => Geometry::Point(f(*c)),
            Geometry::LineString(ls) => Geometry::LineString(LineString::new(map(ls.coords()))),
            Geometry::LinearRing(ring) => Geometry::LinearRing(map_ring(ring)),
            Geometry::Polygon(polygon) => Geometry::Polygon(map_polygon(polygon)),
            Geometry::MultiPolygon(polygons) => {
                Geometry::MultiPolygon(polygons.iter().map(map_polygon).collect())
            }
            Geometry::MultiLineString(lines) => Geometry::MultiLineString(
                lines
                    .iter()
                    .map(|ls| LineString::new(map(ls.coords())))
                    .collect(),
            ),
            Geometry::GeometryCollection(children) => {
                Geometry::GeometryCollection(children.iter().map(|g| g.map_coords(f)).collect())
            }
        }
    }

    /// Planar area of the polygonal parts; lineal and puntal parts count zero.
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Polygon(polygon) => polygon.area(),
            Geometry::MultiPolygon(polygons) => polygons.iter().map(Polygon::area).sum(),
            Geometry::GeometryCollection(children) => children.iter().map(Geometry::area).sum(),
            _ => 0.,
        }
    }

    pub fn num_coords(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::LineString(ls) => ls.len(),
            Geometry::LinearRing(ring) => ring.len(),
            Geometry::Polygon(polygon) => polygon.rings().map(LinearRing::len).sum(),
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(Polygon::rings)
                .map(LinearRing::len)
                .sum(),
            Geometry::MultiLineString(lines) => lines.iter().map(LineString::len).sum(),
            Geometry::GeometryCollection(children) => {
                children.iter().map(Geometry::num_coords).sum()
            }
        }
    }

    /// Simple-features validity of the geometry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_geometry(self)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Self {
        Geometry::Polygon(polygon)
    }
}

impl From<LineString> for Geometry {
    fn from(line_string: LineString) -> Self {
        Geometry::LineString(line_string)
    }
}

impl From<LinearRing> for Geometry {
    fn from(ring: LinearRing) -> Self {
        Geometry::LinearRing(ring)
    }
}

impl From<Coordinate> for Geometry {
    fn from(coord: Coordinate) -> Self {
        Geometry::Point(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Polygon {
        Polygon::new(
            LinearRing::from(vec![
                (0., 0.),
                (size, 0.),
                (size, size),
                (0., size),
                (0., 0.),
            ]),
            vec![],
        )
    }

    #[test]
    fn test_empty() {
        assert!(Geometry::empty().is_empty());
        assert_eq!(Geometry::default(), Geometry::empty());
        assert!(Geometry::MultiPolygon(vec![]).is_empty());
        assert!(!Geometry::Point((0., 0.).into()).is_empty());
    }

    #[test]
    fn test_map_coords_preserves_structure() {
        let geometry = Geometry::GeometryCollection(vec![
            Geometry::Point((1., 1.).into()),
            Geometry::MultiPolygon(vec![square(1.), square(2.)]),
        ]);
        let scaled = geometry.map_coords(&|c| c * 2.);
        match &scaled {
            Geometry::GeometryCollection(children) => {
                assert_eq!(children[0], Geometry::Point((2., 2.).into()));
                assert_eq!(
                    children[1],
                    Geometry::MultiPolygon(vec![square(2.), square(4.)])
                );
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(scaled.num_coords(), geometry.num_coords());
        assert_eq!(scaled.area(), 4. * geometry.area());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Geometry>();
        assert_send_sync::<Polygon>();
        assert_send_sync::<crate::SegRTree>();
        assert_send_sync::<crate::PrecisionModel>();
        assert_send_sync::<crate::ProjectionConfig>();
    }
}
