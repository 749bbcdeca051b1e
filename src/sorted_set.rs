//! Scored ordered set: a member→score dictionary paired with a
//! `(score, member)`-ordered index.
//!
//! The dictionary answers point lookups in O(1), the tree answers
//! range-by-score scans with an O(log n) range start and ordered iteration.
//! Both structures are kept consistent at every public boundary.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Bound;

/// One entry of the set as surfaced by range scans.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredElement {
    pub member: String,
    pub score: f64,
}

/// One end of a score interval.
///
/// The infinite variants dominate any value; `Incl`/`Excl` carry the usual
/// closed/open semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreBound {
    NegInf,
    PosInf,
    Incl(f64),
    Excl(f64),
}

/// Ordering key for the tree: score first (total order over f64), member
/// string as the tie-breaker.
#[derive(Debug, Clone, PartialEq)]
struct SetKey {
    score: f64,
    member: String,
}

impl SetKey {
    /// The smallest key at a given score: `""` sorts before every member.
    fn floor(score: f64) -> Self {
        SetKey {
            score,
            member: String::new(),
        }
    }
}

impl Eq for SetKey {}

impl Ord for SetKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.member.cmp(&other.member))
    }
}

impl PartialOrd for SetKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An ordered scored set over unique string members.
///
/// # Examples
///
/// ```
/// use geoset::{ScoreBound, SortedSet};
///
/// let mut set = SortedSet::new();
/// assert!(set.upsert("a", 1.0));
/// assert!(set.upsert("b", 2.0));
/// assert!(!set.upsert("a", 3.0)); // re-score, not an insert
///
/// let all = set.range_by_score(ScoreBound::NegInf, ScoreBound::PosInf, 0, None, true);
/// assert_eq!(all[0].member, "b");
/// assert_eq!(all[1].member, "a");
/// ```
#[derive(Debug, Default)]
pub struct SortedSet {
    scores: FxHashMap<String, f64>,
    ordered: BTreeSet<SetKey>,
}

impl SortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member or move an existing one to a new score.
    ///
    /// Returns `true` iff the member was newly inserted.
    pub fn upsert(&mut self, member: impl Into<String>, score: f64) -> bool {
        let member = member.into();
        let previous = self.scores.insert(member.clone(), score);
        if let Some(old) = previous {
            self.ordered.remove(&SetKey {
                score: old,
                member: member.clone(),
            });
        }
        self.ordered.insert(SetKey { score, member });
        previous.is_none()
    }

    /// Remove a member. Returns `true` iff it was present.
    pub fn remove(&mut self, member: &str) -> bool {
        match self.scores.remove(member) {
            Some(score) => {
                self.ordered.remove(&SetKey {
                    score,
                    member: member.to_owned(),
                });
                true
            }
            None => false,
        }
    }

    pub fn score(&self, member: &str) -> Option<f64> {
        self.scores.get(member).copied()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.scores.contains_key(member)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Members whose score lies in the interval described by `lo` and `hi`,
    /// in ascending or descending `(score, member)` order, skipping `offset`
    /// elements and yielding at most `limit` (`None` = unlimited).
    ///
    /// Crossed bounds (`lo > hi`) or an offset past the end produce an empty
    /// vec, never an error.
    pub fn range_by_score(
        &self,
        lo: ScoreBound,
        hi: ScoreBound,
        offset: usize,
        limit: Option<usize>,
        ascending: bool,
    ) -> Vec<ScoredElement> {
        let Some(bounds) = range_bounds(lo, hi) else {
            return Vec::new();
        };
        let take = limit.unwrap_or(usize::MAX);
        if take == 0 {
            return Vec::new();
        }

        let to_element = |key: &SetKey| ScoredElement {
            member: key.member.clone(),
            score: key.score,
        };

        if ascending {
            self.ordered
                .range(bounds)
                .skip(offset)
                .take(take)
                .map(to_element)
                .collect()
        } else {
            self.ordered
                .range(bounds)
                .rev()
                .skip(offset)
                .take(take)
                .map(to_element)
                .collect()
        }
    }
}

/// Translate score bounds into tree bounds, or `None` for a provably empty
/// interval.
///
/// Exclusive-or-inclusive edges both reduce to `Included(floor)` /
/// `Excluded(floor)` keys via `next_up`: stored scores are f64, so
/// `score > v` is exactly `score >= v.next_up()`. This keeps the range
/// start a single tree descent even with ties on the boundary score.
fn range_bounds(lo: ScoreBound, hi: ScoreBound) -> Option<(Bound<SetKey>, Bound<SetKey>)> {
    let start = match lo {
        ScoreBound::NegInf => Bound::Unbounded,
        ScoreBound::PosInf => return None,
        ScoreBound::Incl(v) if v.is_nan() => return None,
        ScoreBound::Incl(v) => Bound::Included(SetKey::floor(v)),
        ScoreBound::Excl(v) if v.is_nan() || v == f64::INFINITY => return None,
        ScoreBound::Excl(v) => Bound::Included(SetKey::floor(v.next_up())),
    };

    let end = match hi {
        ScoreBound::PosInf => Bound::Unbounded,
        ScoreBound::NegInf => return None,
        ScoreBound::Incl(v) if v.is_nan() => return None,
        ScoreBound::Incl(v) if v == f64::INFINITY => Bound::Unbounded,
        ScoreBound::Incl(v) => Bound::Excluded(SetKey::floor(v.next_up())),
        ScoreBound::Excl(v) if v.is_nan() => return None,
        ScoreBound::Excl(v) => Bound::Excluded(SetKey::floor(v)),
    };

    if let (Bound::Included(s), Bound::Excluded(e)) = (&start, &end) {
        if s >= e {
            return None;
        }
    }

    Some((start, end))
}
