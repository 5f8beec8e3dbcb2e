mod coordinate;
mod geometry;
mod line_string;
mod linear_ring;
mod polygon;
mod precision;
mod rectangle;
mod seg_rtree;

pub mod algorithms;
pub mod errors;
pub mod flat_location;
pub mod projection;
pub mod utils;

pub use crate::seg_rtree::SegRTree;
pub use algorithms::{combine, is_convex, polygon_to_line_string, snap_and_fix_polygon};
pub use coordinate::Coordinate;
pub use errors::{GeometryError, ValidationError};
pub use geometry::Geometry;
pub use line_string::LineString;
pub use linear_ring::LinearRing;
pub use polygon::Polygon;
pub use precision::PrecisionModel;
pub use projection::ProjectionConfig;
pub use rectangle::Rectangle;
