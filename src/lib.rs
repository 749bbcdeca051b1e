//! In-memory geospatial member index with 52-bit geohash scores and radius
//! queries.
//!
//! Positions are packed into interleaved 52-bit cell hashes and stored as
//! scores in an ordered set; radius queries union the score ranges of the
//! 3×3 neighbor-cell grid covering the query disk and filter by true
//! great-circle distance.
//!
//! ```rust
//! use geoset::{GeoItem, GeoSet, Unit};
//!
//! let mut geo = GeoSet::new();
//! geo.add(&[
//!     GeoItem::new("beijing", 116.40, 39.90),
//!     GeoItem::new("shanghai", 121.47, 31.23),
//! ])?;
//!
//! let km = geo.dist("beijing", "shanghai", Unit::Kilometers)?;
//! assert!((km - 1067.0).abs() < 1.0);
//!
//! let nearby = geo.radius_by_member("beijing", 2000.0, Unit::Kilometers)?;
//! assert_eq!(nearby.len(), 2);
//! # Ok::<(), geoset::GeoSetError>(())
//! ```

pub mod error;
pub mod geohash;
pub mod index;
pub mod sorted_set;
pub mod types;
pub mod validation;

pub use error::{GeoSetError, Result};
pub use index::GeoSet;
pub use sorted_set::{ScoreBound, ScoredElement, SortedSet};
pub use types::{GeoEntry, GeoItem, Unit};

pub use geo::Point;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{GeoEntry, GeoItem, GeoSet, GeoSetError, Result, Unit};

    pub use geo::Point;
}
