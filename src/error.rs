//! Internal error taxonomy for the lookup pipeline.
//!
//! None of these ever cross the HTTP boundary as a fault: the pipeline
//! collapses them into a uniform `not_found` result and logs the specific
//! variant. The transport layer may map them to status codes when verbose
//! reporting is enabled.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// Address was absent, empty, or not a string.
    #[error("address is empty or malformed")]
    InvalidInput,

    /// Geocoder returned no usable candidate.
    #[error("geocoder returned no usable candidate")]
    GeocodeMiss,

    /// Boundary or parcel dataset could not be fetched or parsed.
    #[error("boundary dataset unavailable: {0}")]
    DataUnavailable(String),

    /// No boundary contains the point.
    #[error("no zoning boundary contains the point")]
    NoMatch,

    /// A spatial query that must return exactly one feature returned more.
    #[error("spatial query returned {0} candidate features")]
    Ambiguous(usize),
}
