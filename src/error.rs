//! Error types for geoset operations.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeoSetError>;

/// Errors surfaced by [`GeoSet`](crate::GeoSet) and the codec underneath it.
///
/// Errors are returned to the caller, never retried or logged internally.
/// A failed call leaves the index untouched: `add` validates every item
/// before the first insert.
#[derive(Debug, Error)]
pub enum GeoSetError {
    /// Empty argument lists, out-of-range coordinates, or a radius that is
    /// not a positive finite number.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A unit tag other than `m`, `km`, `ft`, or `mi`.
    #[error("unsupported unit: {0}, use m, km, ft, mi")]
    InvalidUnit(String),

    /// A named member is not present in the index.
    #[error("no such member")]
    NotFound,
}
