//! Public value types: items fed to the index, radius-query results, and
//! distance units.

use crate::error::GeoSetError;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (member, position) pair accepted by [`GeoSet::add`](crate::GeoSet::add)
/// and returned by [`GeoSet::pos`](crate::GeoSet::pos).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoItem {
    pub member: String,
    /// x = longitude, y = latitude.
    pub point: Point<f64>,
}

impl GeoItem {
    pub fn new(member: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            member: member.into(),
            point: Point::new(lon, lat),
        }
    }
}

/// A single radius-query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEntry {
    pub member: String,
    /// Decoded cell center of the member's stored position.
    pub point: Point<f64>,
    /// Distance from the query center, in the unit the query was issued with.
    pub dist: f64,
    /// The member's 52-bit cell hash as stored in the set.
    pub score: f64,
}

/// Distance units accepted by the query operations.
///
/// Searches always run in meters internally; the unit scales the input
/// radius on the way in and every reported distance on the way out.
///
/// # Examples
///
/// ```
/// use geoset::Unit;
///
/// let unit: Unit = "km".parse().unwrap();
/// assert_eq!(unit, Unit::Kilometers);
/// assert_eq!(unit.meters(), 1000.0);
/// assert!("yd".parse::<Unit>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "mi")]
    Miles,
}

impl Unit {
    /// Meters per one of this unit.
    pub fn meters(self) -> f64 {
        match self {
            Unit::Meters => 1.0,
            Unit::Kilometers => 1000.0,
            Unit::Feet => 0.3048,
            Unit::Miles => 1609.34,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Kilometers => "km",
            Unit::Feet => "ft",
            Unit::Miles => "mi",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Unit {
    type Err = GeoSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(Unit::Meters),
            "km" => Ok(Unit::Kilometers),
            "ft" => Ok(Unit::Feet),
            "mi" => Ok(Unit::Miles),
            other => Err(GeoSetError::InvalidUnit(other.to_string())),
        }
    }
}
