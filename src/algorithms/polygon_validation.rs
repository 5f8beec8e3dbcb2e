use super::point_in_polygon::PreparedRing;
use crate::errors::ValidationError;
use crate::errors::ValidationError::*;
use crate::utils::intersect_segments;
use crate::{Coordinate, Geometry, LinearRing, Polygon};
use std::collections::{HashMap, HashSet};

/// Simple-features validity for any geometry. Lineal and puntal parts only
/// need finite coordinates.
pub fn validate_geometry(geometry: &Geometry) -> Result<(), ValidationError> {
    match geometry {
        Geometry::Point(c) => check_finite(&[*c]),
        Geometry::LineString(ls) => check_finite(ls.coords()),
        Geometry::MultiLineString(lines) => lines.iter().try_for_each(|l| check_finite(l.coords())),
        Geometry::LinearRing(ring) => validate_ring(ring).map(|_| ()),
        Geometry::Polygon(polygon) => validate_polygon(polygon).map(|_| ()),
        Geometry::MultiPolygon(polygons) => validate_multi_polygon(polygons),
        Geometry::GeometryCollection(children) => children.iter().try_for_each(validate_geometry),
    }
}

fn check_finite(coords: &[Coordinate]) -> Result<(), ValidationError> {
    match coords.iter().find(|c| !c.is_finite()) {
        Some(&position) => Err(NonFiniteCoordinate { position }),
        None => Ok(()),
    }
}

/// A ring is valid when it is closed, has at least three distinct vertices,
/// and its segments only meet their neighbours at shared endpoints.
pub fn validate_ring(ring: &LinearRing) -> Result<(), ValidationError> {
    prepare_valid_ring(ring).map(|_| ())
}

fn prepare_valid_ring(ring: &LinearRing) -> Result<PreparedRing, ValidationError> {
    let coords = ring.coords();
    check_finite(coords)?;
    if coords.len() < 4 {
        return Err(TooFewCoordinates(coords.len()));
    }
    if !ring.is_closed() {
        return Err(NotClosed);
    }
    let mut deduped: Vec<Coordinate> = coords.to_vec();
    deduped.dedup();
    if deduped.len() < 4 {
        return Err(TooFewCoordinates(deduped.len()));
    }

    let prepared = PreparedRing::new(deduped);
    for (index_a, index_b) in prepared.rtree().query_self_intersections() {
        check_intersection(index_a, index_b, prepared.coords())?;
    }
    Ok(prepared)
}

fn check_intersection(
    index: usize,
    other_index: usize,
    coords: &[Coordinate],
) -> Result<(), ValidationError> {
    let first_index = index.min(other_index);
    let second_index = index.max(other_index);
    let first_start = coords[first_index];
    let first_end = coords[first_index + 1];
    let second_start = coords[second_index];
    let second_end = coords[second_index + 1];
    match intersect_segments(first_start, first_end, second_start, second_end) {
        None => Ok(()),
        Some((isxn_start, isxn_end)) => {
            if isxn_start != isxn_end {
                Err(OverlappingSegments {
                    first_index,
                    second_index,
                    start: isxn_start,
                    end: isxn_end,
                })
            } else if first_index + 1 == second_index && isxn_start == second_start {
                Ok(())
            } else if first_index == 0
                && second_index == coords.len() - 2
                && isxn_start == first_start
            {
                Ok(())
            } else {
                Err(SelfIntersection {
                    first_index,
                    second_index,
                    position: isxn_start,
                })
            }
        }
    }
}

/// Validate a polygon: valid rings, holes inside the shell and outside each
/// other, at most one contact point between any two rings, and a connected
/// interior.
pub fn validate_polygon(polygon: &Polygon) -> Result<(), ValidationError> {
    prepare_valid_polygon(polygon).map(|_| ())
}

fn prepare_valid_polygon(polygon: &Polygon) -> Result<Vec<PreparedRing>, ValidationError> {
    let rings = polygon
        .rings()
        .map(prepare_valid_ring)
        .collect::<Result<Vec<PreparedRing>, ValidationError>>()?;
    let mut touches = TouchGraph::default();

    for hole in 1..rings.len() {
        let contact = find_contact_point(&rings[hole], &rings[0])
            .map_err(|e| e.unwrap_or(MultipleIntersections { first: 0, second: hole }))?;
        if !rings[0].contains(find_nonequal_point(rings[hole].coords(), contact)) {
            return Err(HoleOutsideShell { hole });
        }
        if let Some(p) = contact {
            touches.add(0, p)?;
            touches.add(hole, p)?;
        }

        for other in 1..hole {
            if !rings[hole]
                .rtree()
                .envelope()
                .intersects(rings[other].rtree().envelope())
            {
                continue;
            }
            let contact = find_contact_point(&rings[hole], &rings[other]).map_err(|e| {
                e.unwrap_or(MultipleIntersections {
                    first: other,
                    second: hole,
                })
            })?;
            if rings[other].contains(find_nonequal_point(rings[hole].coords(), contact)) {
                return Err(NestedHoles { hole, other });
            }
            if rings[hole].contains(find_nonequal_point(rings[other].coords(), contact)) {
                return Err(NestedHoles { hole: other, other: hole });
            }
            if let Some(p) = contact {
                touches.add(hole, p)?;
                touches.add(other, p)?;
            }
        }
    }

    Ok(rings)
}

/// Polygons of a multipolygon may touch at points but must not share
/// segments, cross, or contain one another.
pub fn validate_multi_polygon(polygons: &[Polygon]) -> Result<(), ValidationError> {
    let prepared = polygons
        .iter()
        .map(prepare_valid_polygon)
        .collect::<Result<Vec<Vec<PreparedRing>>, ValidationError>>()?;

    for i in 0..prepared.len() {
        for j in 0..prepared.len() {
            if i == j
                || !prepared[i][0]
                    .rtree()
                    .envelope()
                    .intersects(prepared[j][0].rtree().envelope())
            {
                continue;
            }
            let overlap = OverlappingPolygons {
                first: i.min(j),
                second: i.max(j),
            };
            let shell = &prepared[i][0];
            let mut boundary_points: HashSet<(u64, u64)> = HashSet::new();
            for ring in &prepared[j] {
                for (a, b) in shell.rtree().query_other_intersections(ring.rtree()) {
                    let (sa, ea) = (shell.coords()[a], shell.coords()[a + 1]);
                    let (sb, eb) = (ring.coords()[b], ring.coords()[b + 1]);
                    if let Some((start, end)) = intersect_segments(sa, ea, sb, eb) {
                        let is_vertex = |p: Coordinate| p == sa || p == ea || p == sb || p == eb;
                        if start != end || !is_vertex(start) {
                            return Err(overlap);
                        }
                        boundary_points.insert(coordinate_key(start));
                    }
                }
            }

            let inside_j = |p: Coordinate| {
                !boundary_points.contains(&coordinate_key(p))
                    && prepared[j][0].contains(p)
                    && !prepared[j][1..].iter().any(|hole| hole.contains(p))
            };
            for w in shell.coords().windows(2) {
                if inside_j(w[0]) || inside_j((w[0] + w[1]) * 0.5) {
                    return Err(overlap);
                }
            }
        }
    }
    Ok(())
}

/// The single point where two rings meet, if any. `Err(None)` means they
/// meet more than once; `Err(Some(_))` reports overlapping segments.
fn find_contact_point(
    ring_a: &PreparedRing,
    ring_b: &PreparedRing,
) -> Result<Option<Coordinate>, Option<ValidationError>> {
    let mut contact = None;
    for (index_a, index_b) in ring_a.rtree().query_other_intersections(ring_b.rtree()) {
        let start_a = ring_a.coords()[index_a];
        let end_a = ring_a.coords()[index_a + 1];
        let start_b = ring_b.coords()[index_b];
        let end_b = ring_b.coords()[index_b + 1];

        let (isxn_start, isxn_end) = match intersect_segments(start_a, end_a, start_b, end_b) {
            None => continue,
            Some(isxn) => isxn,
        };
        if isxn_start != isxn_end {
            return Err(Some(OverlappingSegments {
                first_index: index_a,
                second_index: index_b,
                start: isxn_start,
                end: isxn_end,
            }));
        }
        match contact {
            None => contact = Some(isxn_start),
            Some(p) if p == isxn_start => {}
            Some(_) => return Err(None),
        }
    }
    Ok(contact)
}

/// Find a point in coords that is not the needle. Valid rings have at least
/// three distinct points, so one always exists.
fn find_nonequal_point(coords: &[Coordinate], needle: Option<Coordinate>) -> Coordinate {
    coords
        .iter()
        .copied()
        .find(|&coord| needle != Some(coord))
        .unwrap_or(coords[0])
}

fn coordinate_key(c: Coordinate) -> (u64, u64) {
    // Normalize -0.0 so it matches 0.0.
    ((c.x + 0.).to_bits(), (c.y + 0.).to_bits())
}

/// Bipartite graph of rings and their contact points. The interior of a
/// polygon is disconnected exactly when this graph has a cycle.
#[derive(Default)]
struct TouchGraph {
    nodes: HashMap<Node, usize>,
    parents: Vec<usize>,
    edges: HashSet<(usize, (u64, u64))>,
}

#[derive(Hash, PartialEq, Eq)]
enum Node {
    Ring(usize),
    Point((u64, u64)),
}

impl TouchGraph {
    fn add(&mut self, ring: usize, point: Coordinate) -> Result<(), ValidationError> {
        let key = coordinate_key(point);
        if !self.edges.insert((ring, key)) {
            return Ok(());
        }
        let a = self.node(Node::Ring(ring));
        let b = self.node(Node::Point(key));
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return Err(DisconnectedInterior { position: point });
        }
        self.parents[root_a] = root_b;
        Ok(())
    }

    fn node(&mut self, node: Node) -> usize {
        let parents = &mut self.parents;
        *self.nodes.entry(node).or_insert_with(|| {
            parents.push(parents.len());
            parents.len() - 1
        })
    }

    fn find(&mut self, mut index: usize) -> usize {
        while self.parents[index] != index {
            self.parents[index] = self.parents[self.parents[index]];
            index = self.parents[index];
        }
        index
    }
}
