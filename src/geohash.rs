//! 52-bit interleaved geohash codec.
//!
//! Positions are quantized against the Mercator-safe WGS84 envelope into a
//! pair of 26-bit cell indices and interleaved into a single 52-bit integer
//! (latitude bits in the even positions, longitude bits in the odd ones).
//! The Morton layout makes numerically close hashes spatially close, which
//! is what lets the index answer radius queries with a handful of contiguous
//! score-range scans.

use crate::error::Result;
use crate::validation;
use geo::Point;

/// Mercator-safe latitude bounds. Latitudes beyond these quantize onto the
/// outermost cell row.
pub const LAT_MIN: f64 = -85.05112878;
pub const LAT_MAX: f64 = 85.05112878;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// Bit pairs in the canonical storage encoding.
pub const MAX_STEP: u8 = 26;

/// Sphere radius used for all great-circle math, in meters.
pub const EARTH_RADIUS_M: f64 = 6372797.560856;

/// Half the equatorial circumference; the widest span a single cell can
/// cover, used when sizing cells to a search radius.
const MERCATOR_MAX_M: f64 = 20037726.37;

const GEO_ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// An interleaved cell hash at a given resolution.
///
/// `bits` occupies the low `2 * step` bits. A `step` of zero marks the
/// absent cells a neighbor grid produces at the polar edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashBits {
    pub bits: u64,
    pub step: u8,
}

impl HashBits {
    pub fn is_zero(&self) -> bool {
        self.step == 0
    }
}

/// The 3×3 grid of cells covering a query disk.
///
/// Any neighbor may be zero when the center cell sits on a polar edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors {
    pub center: HashBits,
    pub north: HashBits,
    pub south: HashBits,
    pub east: HashBits,
    pub west: HashBits,
    pub north_east: HashBits,
    pub north_west: HashBits,
    pub south_east: HashBits,
    pub south_west: HashBits,
}

impl Neighbors {
    /// Cells in their processing order. The radius driver relies on this
    /// exact order when deduplicating collapsed neighbors.
    pub fn ordered(&self) -> [HashBits; 9] {
        [
            self.center,
            self.north,
            self.south,
            self.east,
            self.west,
            self.north_east,
            self.north_west,
            self.south_east,
            self.south_west,
        ]
    }
}

/// Spread the low 32 bits of `v` over the even positions of a u64.
fn spread(v: u32) -> u64 {
    let mut v = v as u64;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

/// Inverse of [`spread`]: collect the even-position bits of `v`.
fn squash(v: u64) -> u32 {
    let mut v = v & 0x5555_5555_5555_5555;
    v = (v | (v >> 1)) & 0x3333_3333_3333_3333;
    v = (v | (v >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v >> 4)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v >> 8)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v >> 16)) & 0x0000_0000_FFFF_FFFF;
    v as u32
}

fn interleave(lat_idx: u32, lon_idx: u32) -> u64 {
    spread(lat_idx) | (spread(lon_idx) << 1)
}

/// Split an interleaved value back into `(lat_idx, lon_idx)`.
fn deinterleave(bits: u64) -> (u32, u32) {
    (squash(bits), squash(bits >> 1))
}

fn quantize(offset: f64, step: u8) -> u32 {
    let cells = (1u64 << step) as f64;
    (offset * cells).floor().clamp(0.0, cells - 1.0) as u32
}

fn encode_in_range(
    lon: f64,
    lat: f64,
    lon_range: (f64, f64),
    lat_range: (f64, f64),
    step: u8,
) -> u64 {
    let lat_offset = (lat - lat_range.0) / (lat_range.1 - lat_range.0);
    let lon_offset = (lon - lon_range.0) / (lon_range.1 - lon_range.0);
    interleave(quantize(lat_offset, step), quantize(lon_offset, step))
}

/// Encode a position into its canonical 52-bit hash.
///
/// Rejects non-finite coordinates and anything outside [-180, 180] /
/// [-90, 90]. Latitudes in the Mercator-unsafe band collapse onto the
/// outermost cell row.
pub fn encode(lon: f64, lat: f64) -> Result<u64> {
    validation::validate_point(&Point::new(lon, lat))?;
    Ok(encode_in_range(
        lon,
        lat,
        (LON_MIN, LON_MAX),
        (LAT_MIN, LAT_MAX),
        MAX_STEP,
    ))
}

/// Decode a 52-bit hash back to the `(lon, lat)` center of its cell.
pub fn decode(bits: u64) -> (f64, f64) {
    let (lat_idx, lon_idx) = deinterleave(bits);
    let cells = (1u64 << MAX_STEP) as f64;
    let lon = LON_MIN + (lon_idx as f64 + 0.5) * (LON_MAX - LON_MIN) / cells;
    let lat = LAT_MIN + (lat_idx as f64 + 0.5) * (LAT_MAX - LAT_MIN) / cells;
    (lon, lat)
}

/// Build the neighbor cell at `(lon_idx, lat_idx)`, wrapping the longitude
/// index across the date line and zeroing rows past the poles.
fn cell(lon_idx: i64, lat_idx: i64, step: u8) -> HashBits {
    let cells = 1i64 << step;
    if lat_idx < 0 || lat_idx >= cells {
        return HashBits::default();
    }
    let lon_idx = lon_idx.rem_euclid(cells);
    HashBits {
        bits: interleave(lat_idx as u32, lon_idx as u32),
        step,
    }
}

/// The eight cells surrounding `center` at its resolution.
pub fn neighbors(center: HashBits) -> Neighbors {
    let step = center.step;
    let (lat_idx, lon_idx) = deinterleave(center.bits);
    let (x, y) = (lon_idx as i64, lat_idx as i64);

    Neighbors {
        center,
        north: cell(x, y + 1, step),
        south: cell(x, y - 1, step),
        east: cell(x + 1, y, step),
        west: cell(x - 1, y, step),
        north_east: cell(x + 1, y + 1, step),
        north_west: cell(x - 1, y + 1, step),
        south_east: cell(x + 1, y - 1, step),
        south_west: cell(x - 1, y - 1, step),
    }
}

/// Pick the resolution whose cell diagonal just covers `radius_m` at the
/// given latitude. Cells span more longitude near the poles, so the step
/// drops by one beyond ±66° and one more beyond ±80°.
pub fn estimate_steps_by_radius(radius_m: f64, lat: f64) -> u8 {
    if radius_m <= 0.0 {
        return MAX_STEP;
    }

    let mut step = (MERCATOR_MAX_M / radius_m).log2().floor() as i32;
    if !(-66.0..=66.0).contains(&lat) {
        step -= 1;
        if !(-80.0..=80.0).contains(&lat) {
            step -= 1;
        }
    }

    step.clamp(1, MAX_STEP as i32) as u8
}

/// The 3×3 neighbor grid covering a disk of `radius_m` around a point.
pub fn areas_by_radius(lon: f64, lat: f64, radius_m: f64) -> Result<Neighbors> {
    validation::validate_point(&Point::new(lon, lat))?;
    validation::validate_radius(radius_m)?;

    let step = estimate_steps_by_radius(radius_m, lat);
    let bits = encode_in_range(lon, lat, (LON_MIN, LON_MAX), (LAT_MIN, LAT_MAX), step);
    Ok(neighbors(HashBits { bits, step }))
}

/// The half-open 52-bit score range `[min, max)` covered by a cell.
pub fn scores_of_box(hash: HashBits) -> (u64, u64) {
    let shift = 2 * (MAX_STEP - hash.step) as u32;
    (hash.bits << shift, (hash.bits + 1) << shift)
}

/// Render a 52-bit hash as the standard 11-character base-32 geohash.
///
/// The stored hash is quantized against the Mercator-safe envelope, so the
/// cell center is re-encoded against the full ±90/±180 envelope before the
/// 55-bit padded value is emitted MSB-first, five bits per character.
pub fn to_base32(bits: u64) -> String {
    let (lon, lat) = decode(bits);
    let full = encode_in_range(lon, lat, (LON_MIN, LON_MAX), (-90.0, 90.0), MAX_STEP);
    let padded = full << 3;

    let mut out = String::with_capacity(11);
    for i in 0..11u32 {
        let idx = ((padded >> (50 - 5 * i)) & 0x1f) as usize;
        out.push(GEO_ALPHABET[idx] as char);
    }
    out
}

/// Great-circle distance between two positions in meters, via the
/// haversine formula on a sphere of [`EARTH_RADIUS_M`].
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1r = lat1.to_radians();
    let lat2r = lat2.to_radians();
    let u = ((lat2r - lat1r) / 2.0).sin();
    let v = ((lon2.to_radians() - lon1.to_radians()) / 2.0).sin();
    2.0 * EARTH_RADIUS_M * (u * u + lat1r.cos() * lat2r.cos() * v * v).sqrt().asin()
}
