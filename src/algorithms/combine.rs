use crate::Geometry;

/// Combine geometries into one.
///
/// No input gives the empty geometry and a single input is returned as is.
/// Otherwise the result is a flat `GeometryCollection`: nested collections
/// are replaced by their leaves, left to right.
pub fn combine(geometries: Vec<Geometry>) -> Geometry {
    let mut geometries = geometries;
    match geometries.len() {
        0 => Geometry::empty(),
        1 => geometries.remove(0),
        _ => {
            let mut leaves = Vec::with_capacity(geometries.len());
            for geometry in geometries {
                flatten_into(geometry, &mut leaves);
            }
            Geometry::GeometryCollection(leaves)
        }
    }
}

fn flatten_into(geometry: Geometry, leaves: &mut Vec<Geometry>) {
    match geometry {
        Geometry::GeometryCollection(children) => {
            for child in children {
                flatten_into(child, leaves);
            }
        }
        leaf => leaves.push(leaf),
    }
}
