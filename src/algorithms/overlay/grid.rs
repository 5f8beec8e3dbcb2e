//! Integer grid points and the exact predicates the overlay relies on.

use crate::{Coordinate, Rectangle, SegRTree};
use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// Largest absolute grid coordinate accepted. Keeps every product in the
/// predicates below well inside `i128` and every value exact as `f64`.
pub(crate) const MAX_GRID_COORDINATE: i64 = 1 << 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub(crate) fn new(x: i64, y: i64) -> Self {
        GridPoint { x, y }
    }

    /// Nearest grid point, rounding halves up.
    pub(crate) fn round(c: Coordinate) -> Self {
        GridPoint::new((c.x + 0.5).floor() as i64, (c.y + 0.5).floor() as i64)
    }

    pub(crate) fn to_coordinate(self) -> Coordinate {
        Coordinate::new(self.x as f64, self.y as f64)
    }

    pub(crate) fn doubled(self) -> GridPoint {
        GridPoint::new(self.x * 2, self.y * 2)
    }

    pub(crate) fn cross(self, other: GridPoint) -> i128 {
        self.x as i128 * other.y as i128 - self.y as i128 * other.x as i128
    }

    pub(crate) fn dot(self, other: GridPoint) -> i128 {
        self.x as i128 * other.x as i128 + self.y as i128 * other.y as i128
    }
}

impl Add for GridPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        GridPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        GridPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Sign of the turn a -> b -> c: positive when c is left of a->b.
pub(crate) fn orientation(a: GridPoint, b: GridPoint, c: GridPoint) -> i128 {
    (b - a).cross(c - a)
}

/// Whether `p`, known to be collinear with the segment, lies strictly
/// between its endpoints.
pub(crate) fn strictly_between(start: GridPoint, end: GridPoint, p: GridPoint) -> bool {
    let d = end - start;
    let t = (p - start).dot(d);
    t > 0 && t < d.dot(d)
}

/// Exact integer form of `utils::winding_number`.
pub(crate) fn winding_number(point: GridPoint, start: GridPoint, end: GridPoint) -> i32 {
    let side = orientation(start, end, point);
    if start.y <= point.y {
        if end.y > point.y && side > 0 {
            return 1;
        }
    } else if end.y <= point.y && side < 0 {
        return -1;
    }
    0
}

/// Orders directions counter-clockwise starting from the positive x axis.
pub(crate) fn compare_angle(a: GridPoint, b: GridPoint) -> Ordering {
    let half = |d: GridPoint| if d.y > 0 || (d.y == 0 && d.x > 0) { 0 } else { 1 };
    half(a)
        .cmp(&half(b))
        .then_with(|| 0.cmp(&a.cross(b)))
}

/// Twice the signed area of a closed ring.
pub(crate) fn twice_signed_area(ring: &[GridPoint]) -> i128 {
    ring.windows(2).map(|w| w[0].cross(w[1])).sum()
}

/// Envelope of grid points, for the f64 spatial index. Grid values are
/// exact in f64.
pub(crate) fn envelope(points: &[GridPoint]) -> Rectangle {
    points.iter().fold(Rectangle::new_empty(), |mut rect, p| {
        rect.expand_coord(p.to_coordinate());
        rect
    })
}

/// A closed grid ring with a segment index, answering exact winding
/// queries at grid points and segment midpoints.
#[derive(Debug, Clone)]
pub(crate) struct IndexedGridRing {
    doubled: Vec<GridPoint>,
    rtree: SegRTree,
}

impl IndexedGridRing {
    pub(crate) fn new(points: &[GridPoint]) -> Self {
        let coords: Vec<Coordinate> = points.iter().map(|p| p.to_coordinate()).collect();
        IndexedGridRing {
            doubled: points.iter().map(|p| p.doubled()).collect(),
            rtree: SegRTree::from_path(16, &coords),
        }
    }

    /// Winding number around a point given in doubled grid units, so that
    /// segment midpoints stay exact.
    pub(crate) fn winding_number_doubled(&self, doubled_point: GridPoint) -> i32 {
        let point = Coordinate::new(doubled_point.x as f64 / 2., doubled_point.y as f64 / 2.);
        self.rtree.winding_number_by(point, |low, high| {
            winding_number(doubled_point, self.doubled[low], self.doubled[high])
        })
    }
}

/// `numerator / denominator` rounded half up, for a positive denominator.
pub(crate) fn div_round(numerator: i128, denominator: i128) -> i128 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}
