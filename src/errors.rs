use crate::Coordinate;
use thiserror::Error;

/// Failures of the fallible geometry operations.
#[derive(Error, Debug, PartialEq)]
pub enum GeometryError {
    #[error("Unsupported geometry type {0}")]
    UnsupportedGeometryType(&'static str),

    /// `stat` is a short machine-friendly key callers can count failures by.
    #[error("Invalid geometry ({stat}): {message}")]
    InvalidGeometry { stat: &'static str, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GeometryError {
    pub(crate) fn invalid(stat: &'static str, message: impl Into<String>) -> Self {
        GeometryError::InvalidGeometry {
            stat,
            message: message.into(),
        }
    }
}

/// Reasons a polygonal geometry is not valid in the simple-features sense.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Ring has only {0} coordinates")]
    TooFewCoordinates(usize),

    #[error("Ring is not closed: first and last coordinates are not equal.")]
    NotClosed,

    #[error("Non-finite coordinate {position:?}")]
    NonFiniteCoordinate { position: Coordinate },

    #[error("Overlapping segments {first_index} {second_index} between {start:?} and {end:?}")]
    OverlappingSegments {
        first_index: usize,
        second_index: usize,
        start: Coordinate,
        end: Coordinate,
    },

    #[error("Self-intersection for segments {first_index} {second_index} at {position:?}")]
    SelfIntersection {
        first_index: usize,
        second_index: usize,
        position: Coordinate,
    },

    #[error("Hole {hole} is not inside its shell")]
    HoleOutsideShell { hole: usize },

    #[error("Hole {hole} is nested inside hole {other}")]
    NestedHoles { hole: usize, other: usize },

    #[error("Rings {first} and {second} cross or touch more than once")]
    MultipleIntersections { first: usize, second: usize },

    #[error("Polygon interior is disconnected at {position:?}")]
    DisconnectedInterior { position: Coordinate },

    #[error("Polygons {first} and {second} overlap")]
    OverlappingPolygons { first: usize, second: usize },
}
