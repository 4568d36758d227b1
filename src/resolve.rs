//! Zoning resolution: which record's boundary contains the point.

use geo::Point;
use serde::Deserialize;

use crate::error::LookupError;
use crate::geometry::contains;
use crate::models::ZoningRecord;

/// How to treat multiple containing records.
///
/// A spatially partitioned dataset makes the two equivalent; they differ
/// only when boundaries overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Return the first containing record in input order. Overlaps are
    /// resolved by that order, not by any priority rule.
    #[default]
    FirstMatch,
    /// Scan every record; two or more containing records is ambiguous.
    RequireExactlyOne,
}

/// Find the zoning code for the record whose boundary contains `point`.
///
/// Records with empty codes are skipped (the open dataset carries such
/// rows). `Ok(None)` is the normal no-match outcome, not a fault.
pub fn resolve<'a>(
    point: Point<f64>,
    records: &'a [ZoningRecord],
    policy: MatchPolicy,
) -> Result<Option<&'a str>, LookupError> {
    let mut matches = records
        .iter()
        .filter(|r| !r.code.is_empty() && contains(point, &r.boundary));

    match policy {
        MatchPolicy::FirstMatch => Ok(matches.next().map(|r| r.code.as_str())),
        MatchPolicy::RequireExactlyOne => {
            let first = matches.next();
            let extra = matches.count();
            if extra > 0 {
                return Err(LookupError::Ambiguous(1 + extra));
            }
            Ok(first.map(|r| r.code.as_str()))
        }
    }
}
