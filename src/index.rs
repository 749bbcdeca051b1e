//! The geospatial member index.
//!
//! `GeoSet` glues the codec to the scored set: positions become 52-bit cell
//! hashes stored as scores, and radius queries become score-range scans over
//! the 3×3 grid of cells covering the query disk, filtered by true
//! great-circle distance.

use crate::error::{GeoSetError, Result};
use crate::geohash::{self, HashBits};
use crate::sorted_set::{ScoreBound, SortedSet};
use crate::types::{GeoEntry, GeoItem, Unit};
use crate::validation;
use geo::Point;
use tracing::trace;

/// An in-memory index from string members to positions on the WGS84
/// ellipsoid.
///
/// # Thread Safety
///
/// `GeoSet` is a plain mutable value with no internal synchronization.
/// Concurrent callers must provide external exclusion, or wrap the index in
/// a reader-writer lock: readers are [`pos`](Self::pos),
/// [`hash`](Self::hash), [`dist`](Self::dist), [`radius`](Self::radius),
/// and [`radius_by_member`](Self::radius_by_member); writers are
/// [`add`](Self::add) and [`remove`](Self::remove).
///
/// # Examples
///
/// ```rust
/// use geoset::{GeoItem, GeoSet, Unit};
///
/// let mut geo = GeoSet::new();
/// geo.add(&[
///     GeoItem::new("beijing", 116.40, 39.90),
///     GeoItem::new("shanghai", 121.47, 31.23),
/// ])?;
///
/// let km = geo.dist("beijing", "shanghai", Unit::Kilometers)?;
/// assert!((km - 1067.0).abs() < 1.0);
/// # Ok::<(), geoset::GeoSetError>(())
/// ```
#[derive(Debug, Default)]
pub struct GeoSet {
    set: SortedSet,
}

impl GeoSet {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members in the index.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.set.contains(member)
    }

    /// Insert positions, re-scoring members that already exist.
    ///
    /// Every item is validated before the first insert, so a failed call
    /// leaves the index untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoset::{GeoItem, GeoSet};
    ///
    /// let mut geo = GeoSet::new();
    /// geo.add(&[GeoItem::new("nyc", -74.0060, 40.7128)])?;
    /// assert_eq!(geo.len(), 1);
    ///
    /// // Out-of-range coordinates are rejected up front.
    /// assert!(geo.add(&[GeoItem::new("bad", 200.0, 0.0)]).is_err());
    /// # Ok::<(), geoset::GeoSetError>(())
    /// ```
    pub fn add(&mut self, items: &[GeoItem]) -> Result<()> {
        if items.is_empty() {
            return Err(GeoSetError::InvalidInput(
                "at least one item is required for add".into(),
            ));
        }

        let mut scored = Vec::with_capacity(items.len());
        for item in items {
            validation::validate_point(&item.point)?;
            let bits = geohash::encode(item.point.x(), item.point.y())?;
            scored.push((item.member.clone(), bits as f64));
        }

        for (member, score) in scored {
            self.set.upsert(member, score);
        }
        Ok(())
    }

    /// Remove members; absent members are ignored.
    pub fn remove(&mut self, members: &[&str]) -> Result<()> {
        if members.is_empty() {
            return Err(GeoSetError::InvalidInput(
                "at least one member is required for remove".into(),
            ));
        }

        for member in members {
            self.set.remove(member);
        }
        Ok(())
    }

    /// Stored positions, aligned with the input; `None` for absent members.
    ///
    /// Positions are the decoded cell centers, within a step-26 cell
    /// (< 1 m) of the coordinates originally added.
    pub fn pos(&self, members: &[&str]) -> Result<Vec<Option<GeoItem>>> {
        if members.is_empty() {
            return Err(GeoSetError::InvalidInput(
                "at least one member is required for pos".into(),
            ));
        }

        Ok(members
            .iter()
            .map(|member| {
                self.set.score(member).map(|score| {
                    let (lon, lat) = geohash::decode(score as u64);
                    GeoItem::new(*member, lon, lat)
                })
            })
            .collect())
    }

    /// 11-character base-32 geohash strings, aligned with the input; an
    /// empty string for absent members.
    pub fn hash(&self, members: &[&str]) -> Result<Vec<String>> {
        if members.is_empty() {
            return Err(GeoSetError::InvalidInput(
                "at least one member is required for hash".into(),
            ));
        }

        Ok(members
            .iter()
            .map(|member| match self.set.score(member) {
                Some(score) => geohash::to_base32(score as u64),
                None => String::new(),
            })
            .collect())
    }

    /// Great-circle distance between two members, in `unit`.
    ///
    /// Returns [`GeoSetError::NotFound`] if either member is absent.
    pub fn dist(&self, a: &str, b: &str, unit: Unit) -> Result<f64> {
        let score_a = self.set.score(a).ok_or(GeoSetError::NotFound)?;
        let score_b = self.set.score(b).ok_or(GeoSetError::NotFound)?;

        let (lon1, lat1) = geohash::decode(score_a as u64);
        let (lon2, lat2) = geohash::decode(score_b as u64);

        Ok(geohash::distance(lon1, lat1, lon2, lat2) / unit.meters())
    }

    /// Members within `radius` (in `unit`) of a center point.
    ///
    /// Results carry distances in the requested unit and follow the
    /// neighbor-cell processing order; no further ordering is applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geoset::{GeoItem, GeoSet, Point, Unit};
    ///
    /// let mut geo = GeoSet::new();
    /// geo.add(&[
    ///     GeoItem::new("palermo", 13.361389, 38.115556),
    ///     GeoItem::new("catania", 15.087269, 37.502669),
    /// ])?;
    ///
    /// let found = geo.radius(Point::new(15.0, 37.0), 200.0, Unit::Kilometers)?;
    /// assert_eq!(found.len(), 2);
    /// # Ok::<(), geoset::GeoSetError>(())
    /// ```
    pub fn radius(&self, center: Point, radius: f64, unit: Unit) -> Result<Vec<GeoEntry>> {
        validation::validate_radius(radius)?;
        self.search(center.x(), center.y(), radius * unit.meters(), unit)
    }

    /// Members within `radius` (in `unit`) of an existing member.
    ///
    /// Returns [`GeoSetError::NotFound`] if the member is absent. The member
    /// itself is part of the result, at distance zero.
    pub fn radius_by_member(&self, member: &str, radius: f64, unit: Unit) -> Result<Vec<GeoEntry>> {
        validation::validate_radius(radius)?;
        let score = self.set.score(member).ok_or(GeoSetError::NotFound)?;
        let (lon, lat) = geohash::decode(score as u64);
        self.search(lon, lat, radius * unit.meters(), unit)
    }

    /// Run the neighbor-grid search in meters, then scale distances to the
    /// requested unit.
    fn search(&self, lon: f64, lat: f64, radius_m: f64, unit: Unit) -> Result<Vec<GeoEntry>> {
        let area = geohash::areas_by_radius(lon, lat, radius_m)?;
        let cells = area.ordered();
        trace!(
            step = cells[0].step,
            radius_m,
            "radius search over neighbor grid"
        );

        let mut entries = Vec::with_capacity(64);
        // At very large radii several neighbors collapse onto one cell; the
        // collapse shows up as adjacent repeats in processing order, so each
        // cell is compared only against the previously processed one. The
        // comparison arms once a non-center cell has been processed.
        let mut last_processed = 0usize;
        for (i, cell) in cells.iter().enumerate() {
            if cell.is_zero() {
                continue;
            }
            if last_processed != 0 && cells[last_processed] == *cell {
                trace!(index = i, "neighbor collapsed onto previous cell");
                continue;
            }
            self.members_of_box(lon, lat, radius_m, *cell, &mut entries);
            last_processed = i;
        }

        let mul = unit.meters();
        if mul != 1.0 {
            for entry in &mut entries {
                entry.dist /= mul;
            }
        }
        Ok(entries)
    }

    /// Scan one cell's score range and keep the members truly inside the
    /// query disk.
    fn members_of_box(
        &self,
        lon: f64,
        lat: f64,
        radius_m: f64,
        cell: HashBits,
        out: &mut Vec<GeoEntry>,
    ) {
        let (min, max) = geohash::scores_of_box(cell);
        let elements = self.set.range_by_score(
            ScoreBound::Incl(min as f64),
            ScoreBound::Excl(max as f64),
            0,
            None,
            true,
        );

        for element in elements {
            let (x, y) = geohash::decode(element.score as u64);
            let dist = geohash::distance(x, y, lon, lat);
            if dist <= radius_m {
                out.push(GeoEntry {
                    member: element.member,
                    point: Point::new(x, y),
                    dist,
                    score: element.score,
                });
            }
        }
    }
}
