//! Core data models for the zoning lookup service.

pub mod result;
pub mod zoning;

pub use result::{LookupResult, LookupStatus};
pub use zoning::ZoningRecord;
