//! Vancouver Open Data boundary source.
//!
//! Fetches the full zoning-district dataset per lookup and runs the
//! containment test client-side.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use geo::Point;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::BoundarySource;
use crate::error::LookupError;
use crate::geometry::GeoJsonGeometry;
use crate::models::ZoningRecord;
use crate::resolve::{resolve, MatchPolicy};

/// Boundary source backed by the Vancouver Open Data records API.
pub struct OpenDataSource {
    client: Client,
    url: Url,
    policy: MatchPolicy,
    label: String,
}

#[derive(Debug, Deserialize)]
struct DatasetResponse {
    #[serde(default)]
    results: Vec<DatasetRow>,
}

#[derive(Debug, Deserialize)]
struct DatasetRow {
    zoning_district: Option<String>,
    geo_shape: Option<GeoShapeField>,
}

#[derive(Debug, Deserialize)]
struct GeoShapeField {
    // Left loosely typed so one malformed row cannot fail the whole fetch
    geometry: Option<serde_json::Value>,
}

impl OpenDataSource {
    pub fn new(
        url: &str,
        user_agent: &str,
        timeout_secs: u64,
        policy: MatchPolicy,
        label: &str,
    ) -> Result<Self> {
        let url = Url::parse(url).context("Invalid zoning dataset URL")?;

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .build()
            .context("Failed to build dataset HTTP client")?;

        Ok(Self {
            client,
            url,
            policy,
            label: label.to_string(),
        })
    }

    /// Fetch the current zoning record set.
    ///
    /// Rows without a code or without usable areal geometry are skipped;
    /// an empty surviving set is treated the same as a failed fetch.
    async fn fetch_records(&self) -> Result<Vec<ZoningRecord>, LookupError> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[
                ("limit", "10000"),
                ("select", "zoning_district,geo_shape"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::DataUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::DataUnavailable(format!(
                "dataset returned status {}",
                response.status()
            )));
        }

        let payload: DatasetResponse = response
            .json()
            .await
            .map_err(|e| LookupError::DataUnavailable(e.to_string()))?;

        let records: Vec<ZoningRecord> = payload
            .results
            .into_iter()
            .filter_map(|row| {
                let code = row.zoning_district.filter(|c| !c.is_empty())?;
                let geometry = row.geo_shape?.geometry?;
                let boundary = serde_json::from_value::<GeoJsonGeometry>(geometry)
                    .ok()?
                    .to_boundary()?;
                Some(ZoningRecord { code, boundary })
            })
            .collect();

        if records.is_empty() {
            return Err(LookupError::DataUnavailable(
                "dataset returned no usable records".to_string(),
            ));
        }

        debug!("Fetched {} zoning records", records.len());
        Ok(records)
    }
}

#[async_trait]
impl BoundarySource for OpenDataSource {
    async fn zoning_code(&self, point: Point<f64>) -> Result<Option<String>, LookupError> {
        let records = self.fetch_records().await?;
        let code = resolve(point, &records, self.policy)?;
        Ok(code.map(String::from))
    }

    fn label(&self) -> &str {
        &self.label
    }
}
