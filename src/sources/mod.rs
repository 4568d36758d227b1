//! Pluggable boundary sources.
//!
//! The lookup pipeline is parameterized by where zoning boundaries come
//! from: a bulk dataset fetch with the containment test run client-side
//! (`OpenDataSource`), a server-side spatial query whose containment is
//! trusted under an exactly-one-feature policy (`ArcGisSource`), or fixed
//! in-memory records (`FixedSource`).

mod arcgis;
mod fixed;
mod opendata;

pub use arcgis::ArcGisSource;
pub use fixed::FixedSource;
pub use opendata::OpenDataSource;

use async_trait::async_trait;
use geo::Point;

use crate::error::LookupError;

#[async_trait]
pub trait BoundarySource: Send + Sync {
    /// Resolve the zoning code of the district containing `point`.
    ///
    /// `Ok(None)` is the normal no-match outcome.
    async fn zoning_code(&self, point: Point<f64>) -> Result<Option<String>, LookupError>;

    /// Resolve the containing parcel's lot area in square feet.
    ///
    /// `Ok(None)` means this source offers no parcel lookup; a source that
    /// does offer one reports misses and ambiguity as errors, which fail
    /// the whole lookup.
    async fn lot_area_sf(&self, _point: Point<f64>) -> Result<Option<u64>, LookupError> {
        Ok(None)
    }

    /// Label reported as `data_source` in every result.
    fn label(&self) -> &str;
}
