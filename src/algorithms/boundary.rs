use crate::errors::GeometryError;
use crate::{Geometry, LineString, LinearRing, Polygon};

/// Convert the rings of a polygonal geometry into line strings.
///
/// One ring produces a `LineString`, several produce a `MultiLineString`
/// with each polygon's exterior followed by its holes. Coordinates are
/// copied in their original order.
pub fn polygon_to_line_string(geometry: &Geometry) -> Result<Geometry, GeometryError> {
    let mut lines: Vec<LineString> = Vec::new();
    match geometry {
        Geometry::LinearRing(ring) => lines.push(ring.to_line_string()),
        Geometry::Polygon(polygon) => push_rings(polygon, &mut lines),
        Geometry::MultiPolygon(polygons) => {
            for polygon in polygons {
                push_rings(polygon, &mut lines);
            }
        }
        other => {
            return Err(GeometryError::UnsupportedGeometryType(
                other.geometry_type(),
            ))
        }
    }

    match lines.len() {
        0 => Err(GeometryError::invalid(
            "polygon_to_line_string_empty",
            "polygonal geometry has no rings",
        )),
        1 => Ok(Geometry::LineString(lines.remove(0))),
        _ => Ok(Geometry::MultiLineString(lines)),
    }
}

fn push_rings(polygon: &Polygon, lines: &mut Vec<LineString>) {
    lines.extend(polygon.rings().map(LinearRing::to_line_string));
}
