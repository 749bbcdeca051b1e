//! Validation for geographic coordinates and search radii.

use crate::error::{GeoSetError, Result};
use geo::Point;

/// Validates that a point carries usable coordinates.
///
/// Longitude must lie in [-180, 180] and latitude in [-90, 90]. Latitudes
/// beyond the Mercator-safe band (±85.05112878) pass here; the codec
/// collapses them onto the outermost cell row when quantizing.
///
/// # Examples
///
/// ```
/// use geoset::validation::validate_point;
/// use geoset::Point;
///
/// assert!(validate_point(&Point::new(36.8219, -1.2921)).is_ok());
/// assert!(validate_point(&Point::new(361.0, -1.2921)).is_err());
/// ```
pub fn validate_point(point: &Point) -> Result<()> {
    check_degrees("longitude", point.x(), 180.0)?;
    check_degrees("latitude", point.y(), 90.0)
}

/// Validates a search radius in any unit.
pub fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(GeoSetError::InvalidInput(format!(
            "search radius must be a finite number, got {radius}"
        )));
    }

    if radius <= 0.0 {
        return Err(GeoSetError::InvalidInput(format!(
            "search radius must be positive, got {radius}"
        )));
    }

    Ok(())
}

fn check_degrees(axis: &str, value: f64, limit: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(GeoSetError::InvalidInput(format!(
            "non-finite {axis}: {value}"
        )));
    }

    if value.abs() > limit {
        return Err(GeoSetError::InvalidInput(format!(
            "{axis} {value} outside the +/-{limit} degree range"
        )));
    }

    Ok(())
}
