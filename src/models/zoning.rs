//! Zoning district records.

use geo::MultiPolygon;

/// A zoning district code with its boundary geometry.
///
/// Records are fetched fresh for each lookup and never outlive the
/// request. Single-polygon districts are normalized to one-member
/// multipolygons at the adapter boundary.
#[derive(Debug, Clone)]
pub struct ZoningRecord {
    /// Municipal zoning classification, e.g. "RT-1".
    pub code: String,
    pub boundary: MultiPolygon<f64>,
}
