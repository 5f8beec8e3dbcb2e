use crate::LinearRing;
use std::f64::consts::PI;

/// Largest sine of a turn against the majority direction that still counts
/// as straight. Sines are scale free, so the same threshold works for tile
/// pixels and for world coordinates.
const TURN_SINE_TOLERANCE: f64 = 1e-3;

/// Whether every vertex of `ring` turns the same way (up to a small
/// tolerance) and the ring winds around exactly once.
///
/// Consecutive duplicate points are ignored and collinear vertices count as
/// convex. Rings with fewer than three distinct vertices are convex. The
/// answer does not depend on ring direction, reflection, rotation, or scale.
pub fn is_convex(ring: &LinearRing) -> bool {
    let vertices = ring.distinct_vertices();
    let n = vertices.len();
    if n < 3 {
        return true;
    }

    let mut turns_left = false;
    let mut turns_right = false;
    let mut total_turn = 0.;
    for i in 0..n {
        let previous = vertices[(i + n - 1) % n];
        let current = vertices[i];
        let next = vertices[(i + 1) % n];
        let incoming = current - previous;
        let outgoing = next - current;
        let scale = incoming.norm() * outgoing.norm();
        let sine = incoming.cross(outgoing) / scale;
        let cosine = incoming.dot(outgoing) / scale;

        if sine > TURN_SINE_TOLERANCE {
            turns_left = true;
        } else if sine < -TURN_SINE_TOLERANCE {
            turns_right = true;
        } else if cosine < 0. {
            // The ring doubles back on itself.
            return false;
        }
        if turns_left && turns_right {
            return false;
        }
        total_turn += sine.atan2(cosine);
    }

    // A star shape turns consistently but winds more than once.
    total_turn.abs() < 3. * PI
}
