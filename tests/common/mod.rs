#![allow(dead_code)]

use tile_geometry::{Coordinate, Geometry, LineString, LinearRing, Polygon};
use wkt::types;
use wkt::types::Coord;

fn to_coordinate(coord: &Coord<f64>) -> Coordinate {
    Coordinate::new(coord.x, coord.y)
}

fn to_coordinates(linestring: &types::LineString<f64>) -> Vec<Coordinate> {
    linestring.0.iter().map(to_coordinate).collect()
}

fn to_polygon(polygon: &types::Polygon<f64>) -> Polygon {
    let mut rings = polygon.0.iter().map(|ls| LinearRing::new(to_coordinates(ls)));
    let shell = rings.next().unwrap_or_else(|| LinearRing::new(Vec::new()));
    Polygon::new(shell, rings.collect())
}

fn to_geometry(geometry: &wkt::Geometry<f64>) -> Geometry {
    match geometry {
        wkt::Geometry::Point(point) => match &point.0 {
            Some(coord) => Geometry::Point(to_coordinate(coord)),
            None => Geometry::empty(),
        },
        wkt::Geometry::LineString(ls) => Geometry::LineString(LineString::new(to_coordinates(ls))),
        wkt::Geometry::Polygon(polygon) => Geometry::Polygon(to_polygon(polygon)),
        wkt::Geometry::MultiLineString(mls) => Geometry::MultiLineString(
            mls.0
                .iter()
                .map(|ls| LineString::new(to_coordinates(ls)))
                .collect(),
        ),
        wkt::Geometry::MultiPolygon(mp) => {
            Geometry::MultiPolygon(mp.0.iter().map(to_polygon).collect())
        }
        wkt::Geometry::GeometryCollection(gc) => {
            Geometry::GeometryCollection(gc.0.iter().map(to_geometry).collect())
        }
        wkt::Geometry::MultiPoint(mp) => Geometry::GeometryCollection(
            mp.0
                .iter()
                .filter_map(|p| p.0.as_ref())
                .map(|c| Geometry::Point(to_coordinate(c)))
                .collect(),
        ),
    }
}

/// Parse a single WKT geometry, panicking on malformed input.
pub fn parse_wkt(wkt_str: &str) -> Geometry {
    let parsed = wkt::Wkt::<f64>::from_str(wkt_str).expect("valid WKT");
    let mut items: Vec<Geometry> = parsed.items.iter().map(to_geometry).collect();
    assert_eq!(items.len(), 1, "expected one geometry in {}", wkt_str);
    items.remove(0)
}

pub fn rectangle(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Polygon {
    Polygon::new(
        LinearRing::from(vec![
            (x_min, y_min),
            (x_max, y_min),
            (x_max, y_max),
            (x_min, y_max),
            (x_min, y_min),
        ]),
        vec![],
    )
}
