//! Spherical web mercator between longitude/latitude degrees and world
//! coordinates, where the whole world maps onto the unit square with
//! (0, 0) at the north-west corner.
//!
//! Nothing here clamps: longitudes past ±180° extrapolate linearly and
//! latitudes past the mercator limit keep following the forward formula.

use crate::{Coordinate, Geometry};
use std::f64::consts::PI;

/// Pixels along one edge of a tile.
pub const TILE_PIXEL_SIZE: f64 = 256.;

/// Equatorial circumference of the spherical earth used by web mercator.
pub const EQUATORIAL_CIRCUMFERENCE_METERS: f64 = 40_075_016.685_578_49;

/// Constants for converting between meters and pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    pub tile_pixel_size: f64,
    pub equatorial_circumference_meters: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            tile_pixel_size: TILE_PIXEL_SIZE,
            equatorial_circumference_meters: EQUATORIAL_CIRCUMFERENCE_METERS,
        }
    }
}

impl ProjectionConfig {
    /// Ground distance covered by one pixel at the equator at `zoom`.
    pub fn meters_per_pixel_at_equator(&self, zoom: i32) -> f64 {
        self.equatorial_circumference_meters / (self.tile_pixel_size * 2f64.powi(zoom))
    }

    /// Pixels spanned by `meters` at the equator at `zoom`.
    pub fn meters_to_pixels_at_equator(&self, zoom: i32, meters: f64) -> f64 {
        meters / self.meters_per_pixel_at_equator(zoom)
    }
}

pub fn meters_per_pixel_at_equator(zoom: i32) -> f64 {
    ProjectionConfig::default().meters_per_pixel_at_equator(zoom)
}

pub fn meters_to_pixels_at_equator(zoom: i32, meters: f64) -> f64 {
    ProjectionConfig::default().meters_to_pixels_at_equator(zoom, meters)
}

pub fn world_x(lon: f64) -> f64 {
    (lon + 180.) / 360.
}

pub fn world_y(lat: f64) -> f64 {
    0.5 - lat.to_radians().tan().asinh() / (2. * PI)
}

pub fn lon_from_world_x(x: f64) -> f64 {
    x * 360. - 180.
}

pub fn lat_from_world_y(y: f64) -> f64 {
    ((0.5 - y) * 2. * PI).sinh().atan().to_degrees()
}

/// `lon_lat.x` is longitude and `lon_lat.y` latitude, in degrees.
pub fn coordinate_to_world(lon_lat: Coordinate) -> Coordinate {
    Coordinate::new(world_x(lon_lat.x), world_y(lon_lat.y))
}

pub fn world_to_coordinate(world: Coordinate) -> Coordinate {
    Coordinate::new(lon_from_world_x(world.x), lat_from_world_y(world.y))
}

/// Project every coordinate of a longitude/latitude geometry.
pub fn lat_lon_to_world(geometry: &Geometry) -> Geometry {
    geometry.map_coords(&coordinate_to_world)
}

/// Inverse of [`lat_lon_to_world`].
pub fn world_to_lat_lon(geometry: &Geometry) -> Geometry {
    geometry.map_coords(&world_to_coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const CASES: [(f64, f64, f64, f64); 8] = [
        (0., 0., 0.5, 0.5),
        (0., -180., 0., 0.5),
        (0., 180., 1., 0.5),
        (0., 180. - 1e-7, 1., 0.5),
        (45., 0., 0.5, 0.359725),
        (-45., 0., 0.5, 0.640275),
        (86., -198., -0.05, -0.03391287),
        (-86., 198., 1.05, 1.03391287),
    ];

    #[test]
    fn test_world_coordinates() {
        for &(lat, lon, x, y) in CASES.iter() {
            assert_abs_diff_eq!(world_x(lon), x, epsilon = 1e-5);
            assert_abs_diff_eq!(world_y(lat), y, epsilon = 1e-5);
            assert_abs_diff_eq!(lon_from_world_x(x), lon, epsilon = 1e-3);
            assert_abs_diff_eq!(lat_from_world_y(y), lat, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_point_round_trip() {
        for &(lat, lon, x, y) in CASES.iter() {
            let point = Geometry::Point((lon, lat).into());
            let world = lat_lon_to_world(&point);
            match world {
                Geometry::Point(c) => {
                    assert_abs_diff_eq!(c.x, x, epsilon = 1e-5);
                    assert_abs_diff_eq!(c.y, y, epsilon = 1e-5);
                }
                ref other => panic!("unexpected {:?}", other),
            }
            match world_to_lat_lon(&world) {
                Geometry::Point(c) => {
                    assert_abs_diff_eq!(c.x, lon, epsilon = 1e-5);
                    assert_abs_diff_eq!(c.y, lat, epsilon = 1e-5);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_meters_per_pixel() {
        assert_abs_diff_eq!(meters_per_pixel_at_equator(0), 156543., epsilon = 1.);
        assert_abs_diff_eq!(meters_per_pixel_at_equator(8), 611., epsilon = 1.);
        assert_abs_diff_eq!(meters_per_pixel_at_equator(14), 9., epsilon = 1.);
        assert_abs_diff_eq!(
            meters_to_pixels_at_equator(14, meters_per_pixel_at_equator(14) * 3.),
            3.,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_custom_config() {
        let config = ProjectionConfig {
            tile_pixel_size: 512.,
            ..ProjectionConfig::default()
        };
        assert_abs_diff_eq!(
            config.meters_per_pixel_at_equator(0) * 2.,
            meters_per_pixel_at_equator(0),
            epsilon = 1e-9
        );
    }

    proptest! {
        #[test]
        fn round_trips_through_world(lon in -540f64..540., lat in -89.9f64..89.9) {
            let back = world_to_coordinate(coordinate_to_world((lon, lat).into()));
            prop_assert!((back.x - lon).abs() < 1e-9);
            prop_assert!((back.y - lat).abs() < 1e-9);
        }
    }
}
