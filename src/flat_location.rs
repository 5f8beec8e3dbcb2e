//! Packs a world coordinate into a single `u64` for compact sorting and
//! deduplication.
//!
//! Layout (a stable contract for anything that stores these values):
//!
//! ```text
//!  63                              32 31                               0
//! +----------------------------------+----------------------------------+
//! |      floor((world_x + 2) * 2^30) |      floor((world_y + 2) * 2^30) |
//! +----------------------------------+----------------------------------+
//! ```
//!
//! Each 32-bit field covers world values in `[-2, 2)` with a resolution of
//! `2^-30`, so coordinates wrapped past the antimeridian or beyond the
//! mercator limit still round-trip. Values outside that range saturate and NaN
//! encodes as 0.

use crate::projection::{world_x, world_y};
use crate::Coordinate;

const QUANTIZED_WORLD_SCALE: f64 = (1u64 << 30) as f64;
const WORLD_OFFSET: f64 = 2.;
const MAX_QUANTIZED: u64 = u32::MAX as u64;
const LOWER_32_BIT_MASK: u64 = 0xffff_ffff;

fn quantize(world: f64) -> u64 {
    let scaled = ((world + WORLD_OFFSET) * QUANTIZED_WORLD_SCALE).floor();
    // f64::max maps NaN to 0.
    scaled.max(0.).min(MAX_QUANTIZED as f64) as u64
}

fn dequantize(bits: u64) -> f64 {
    bits as f64 / QUANTIZED_WORLD_SCALE - WORLD_OFFSET
}

/// Encode a longitude/latitude pair in degrees.
pub fn encode_flat_location(lon: f64, lat: f64) -> u64 {
    encode_world(world_x(lon), world_y(lat))
}

/// Encode an already projected world coordinate.
pub fn encode_world(x: f64, y: f64) -> u64 {
    (quantize(x) << 32) | quantize(y)
}

pub fn decode_world_x(encoded: u64) -> f64 {
    dequantize(encoded >> 32)
}

pub fn decode_world_y(encoded: u64) -> f64 {
    dequantize(encoded & LOWER_32_BIT_MASK)
}

pub fn decode_world(encoded: u64) -> Coordinate {
    Coordinate::new(decode_world_x(encoded), decode_world_y(encoded))
}
