//! The externally observable lookup result.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a lookup. Callers branch on this, never on HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Success,
    NotFound,
}

/// The response body contract.
///
/// All nullable fields are null when `lookup_status` is `not_found`; this
/// shape is the only thing the service ever answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResult {
    pub lookup_status: LookupStatus,
    pub zoning_code: Option<String>,
    pub lot_area_sf: Option<u64>,
    pub data_source: String,
    /// ISO-8601 UTC timestamp of when the result was produced.
    pub timestamp: String,
}

impl LookupResult {
    pub fn success(code: String, lot_area_sf: Option<u64>, data_source: &str) -> Self {
        Self {
            lookup_status: LookupStatus::Success,
            zoning_code: Some(code),
            lot_area_sf,
            data_source: data_source.to_string(),
            timestamp: now_utc(),
        }
    }

    pub fn not_found(data_source: &str) -> Self {
        Self {
            lookup_status: LookupStatus::NotFound,
            zoning_code: None,
            lot_area_sf: None,
            data_source: data_source.to_string(),
            timestamp: now_utc(),
        }
    }
}

fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
