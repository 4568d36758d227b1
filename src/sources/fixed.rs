//! Fixed in-memory boundary source.

use async_trait::async_trait;
use geo::Point;

use super::BoundarySource;
use crate::error::LookupError;
use crate::models::ZoningRecord;
use crate::resolve::{resolve, MatchPolicy};

/// Boundary source backed by a fixed record set.
///
/// Used as an offline stub provider and by tests; the containment test
/// runs client-side like the open-data source.
pub struct FixedSource {
    records: Vec<ZoningRecord>,
    lot_area_sf: Option<u64>,
    policy: MatchPolicy,
    label: String,
}

impl FixedSource {
    pub fn new(records: Vec<ZoningRecord>, policy: MatchPolicy, label: &str) -> Self {
        Self {
            records,
            lot_area_sf: None,
            policy,
            label: label.to_string(),
        }
    }

    /// Answer every matched lookup with this lot area.
    pub fn with_lot_area(mut self, lot_area_sf: u64) -> Self {
        self.lot_area_sf = Some(lot_area_sf);
        self
    }
}

#[async_trait]
impl BoundarySource for FixedSource {
    async fn zoning_code(&self, point: Point<f64>) -> Result<Option<String>, LookupError> {
        let code = resolve(point, &self.records, self.policy)?;
        Ok(code.map(String::from))
    }

    async fn lot_area_sf(&self, _point: Point<f64>) -> Result<Option<u64>, LookupError> {
        Ok(self.lot_area_sf)
    }

    fn label(&self) -> &str {
        &self.label
    }
}
