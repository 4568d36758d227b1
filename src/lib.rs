//! Arbutus - zoning lookup for Vancouver street addresses.
//!
//! Geocodes an address, finds the zoning district polygon containing the
//! point, and answers with a normalized JSON result. The pipeline is
//! parameterized by a pluggable boundary source: bulk open-data fetch
//! with client-side containment, or ArcGIS server-side spatial query.

pub mod config;
pub mod error;
pub mod geocode;
pub mod geometry;
pub mod http;
pub mod models;
pub mod pipeline;
pub mod resolve;
pub mod sources;

pub use error::LookupError;
pub use models::{LookupResult, LookupStatus, ZoningRecord};
pub use pipeline::LookupService;
pub use resolve::MatchPolicy;
