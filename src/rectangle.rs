use crate::Coordinate;

/// Axis-aligned envelope. A rectangle with any NaN field is empty; empty
/// rectangles intersect and contain nothing.
#[derive(Copy, Clone, Debug)]
pub struct Rectangle {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            other.is_empty()
        } else {
            self.x_min == other.x_min
                && self.y_min == other.y_min
                && self.x_max == other.x_max
                && self.y_max == other.y_max
        }
    }
}

impl Rectangle {
    pub fn new(p1: Coordinate, p2: Coordinate) -> Self {
        Rectangle {
            x_min: p1.x.min(p2.x),
            y_min: p1.y.min(p2.y),
            x_max: p1.x.max(p2.x),
            y_max: p1.y.max(p2.y),
        }
    }

    pub fn new_empty() -> Self {
        Rectangle {
            x_min: f64::NAN,
            y_min: f64::NAN,
            x_max: f64::NAN,
            y_max: f64::NAN,
        }
    }

    pub fn of(rects: &[Rectangle]) -> Self {
        rects.iter().fold(Rectangle::new_empty(), |mut s, r| {
            s.expand(*r);
            s
        })
    }

    pub fn of_coords(coords: &[Coordinate]) -> Self {
        coords.iter().fold(Rectangle::new_empty(), |mut s, c| {
            s.expand_coord(*c);
            s
        })
    }

    pub fn is_empty(&self) -> bool {
        self.x_min.is_nan() || self.y_min.is_nan() || self.x_max.is_nan() || self.y_max.is_nan()
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            x: (self.x_max + self.x_min) / 2.,
            y: (self.y_max + self.y_min) / 2.,
        }
    }

    pub fn intersects(&self, other: Rectangle) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        self.x_min <= point.x
            && point.x <= self.x_max
            && self.y_min <= point.y
            && point.y <= self.y_max
    }

    pub fn contains_rect(&self, other: Rectangle) -> bool {
        self.x_min <= other.x_min
            && self.x_max >= other.x_max
            && self.y_min <= other.y_min
            && self.y_max >= other.y_max
    }

    /// Grow to cover `other`. f64::min/max ignore a NaN operand, so
    /// expanding an empty rectangle adopts the other one.
    pub fn expand(&mut self, other: Rectangle) {
        self.x_min = self.x_min.min(other.x_min);
        self.y_min = self.y_min.min(other.y_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_max = self.y_max.max(other.y_max);
    }

    pub fn expand_coord(&mut self, coord: Coordinate) {
        self.expand(Rectangle::new(coord, coord));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let empty = Rectangle::new_empty();
        assert!(empty.is_empty());
        assert_eq!(empty, Rectangle::of(&[]));
        assert!(!empty.intersects(Rectangle::new((0., 0.).into(), (1., 1.).into())));
        assert!(!empty.contains((0., 0.).into()));
    }

    #[test]
    fn test_of_coords() {
        let rect = Rectangle::of_coords(&[(1., 2.).into(), (-1., 0.).into(), (0., 5.).into()]);
        assert_eq!(
            rect,
            Rectangle {
                x_min: -1.,
                y_min: 0.,
                x_max: 1.,
                y_max: 5.,
            }
        );
        assert_eq!(rect.center(), Coordinate::new(0., 2.5));
    }

    #[test]
    fn test_relations() {
        let outer = Rectangle::new((0., 0.).into(), (3., 3.).into());
        let inner = Rectangle::new((1., 1.).into(), (2., 2.).into());
        let touching = Rectangle::new((3., 3.).into(), (4., 4.).into());
        assert!(outer.contains_rect(inner));
        assert!(!inner.contains_rect(outer));
        assert!(outer.intersects(touching));
        assert!(!inner.intersects(touching));
        assert!(outer.contains((3., 0.).into()));
    }
}
