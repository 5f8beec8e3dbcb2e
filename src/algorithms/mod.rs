mod boundary;
mod combine;
mod convexity;
mod overlay;
mod point_in_polygon;
mod polygon_validation;
mod snap_and_fix;

pub use boundary::polygon_to_line_string;
pub use combine::combine;
pub use convexity::is_convex;
pub use point_in_polygon::{point_in_polygon, point_in_ring};
pub use polygon_validation::{
    validate_geometry, validate_multi_polygon, validate_polygon, validate_ring,
};
pub use snap_and_fix::snap_and_fix_polygon;
