//! ArcGIS REST boundary source.
//!
//! Issues a server-side spatial point query per layer and trusts the
//! provider's containment test, under an exactly-one-feature policy:
//! zero features is a miss, two or more is ambiguous.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use geo::Point;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::BoundarySource;
use crate::error::LookupError;

const SQM_TO_SQFT: f64 = 10.7639;

/// Boundary source backed by ArcGIS layer query endpoints.
pub struct ArcGisSource {
    client: Client,
    zoning_url: Url,
    zoning_field: String,
    parcel_url: Option<Url>,
    label: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Vec<Feature>,
    // ArcGIS reports failures as an error envelope inside a 200 response
    error: Option<QueryError>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct QueryError {
    code: Option<i64>,
    message: Option<String>,
}

impl ArcGisSource {
    pub fn new(
        zoning_url: &str,
        zoning_field: &str,
        parcel_url: Option<&str>,
        user_agent: &str,
        timeout_secs: u64,
        label: &str,
    ) -> Result<Self> {
        let zoning_url = Url::parse(zoning_url).context("Invalid ArcGIS zoning layer URL")?;
        let parcel_url = parcel_url
            .map(|u| Url::parse(u).context("Invalid ArcGIS parcel layer URL"))
            .transpose()?;

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build ArcGIS HTTP client")?;

        Ok(Self {
            client,
            zoning_url,
            zoning_field: zoning_field.to_string(),
            parcel_url,
            label: label.to_string(),
        })
    }

    async fn query_layer(
        &self,
        url: &Url,
        point: Point<f64>,
        out_fields: &str,
    ) -> Result<Vec<Feature>, LookupError> {
        let geometry = format!("{},{}", point.x(), point.y());

        let response = self
            .client
            .get(url.clone())
            .query(&[
                ("f", "json"),
                ("geometry", geometry.as_str()),
                ("geometryType", "esriGeometryPoint"),
                ("inSR", "4326"),
                ("spatialRel", "esriSpatialRelIntersects"),
                ("outFields", out_fields),
                ("returnGeometry", "false"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::DataUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::DataUnavailable(format!(
                "layer query returned status {}",
                response.status()
            )));
        }

        let payload: QueryResponse = response
            .json()
            .await
            .map_err(|e| LookupError::DataUnavailable(e.to_string()))?;

        if let Some(err) = payload.error {
            return Err(LookupError::DataUnavailable(format!(
                "ArcGIS error {}: {}",
                err.code.unwrap_or(0),
                err.message.unwrap_or_default()
            )));
        }

        Ok(payload.features)
    }
}

/// Enforce the exactly-one-feature policy on a layer query result.
fn exactly_one(features: Vec<Feature>) -> Result<Option<Feature>, LookupError> {
    match features.len() {
        0 => Ok(None),
        1 => Ok(features.into_iter().next()),
        n => Err(LookupError::Ambiguous(n)),
    }
}

/// Attribute lookup tolerant of the provider's field-name casing.
fn attr<'a>(attributes: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// Lot area in square feet from parcel attributes.
///
/// `lot_area` is taken as square feet verbatim; when only `lot_area_sqm`
/// is present it is converted and rounded to a whole number.
fn area_from_attributes(attributes: &Map<String, Value>) -> Option<u64> {
    if let Some(sf) = attr(attributes, "lot_area").and_then(Value::as_f64) {
        return Some(sf.round() as u64);
    }

    attr(attributes, "lot_area_sqm")
        .and_then(Value::as_f64)
        .map(|sqm| (sqm * SQM_TO_SQFT).round() as u64)
}

#[async_trait]
impl BoundarySource for ArcGisSource {
    async fn zoning_code(&self, point: Point<f64>) -> Result<Option<String>, LookupError> {
        let features = self
            .query_layer(&self.zoning_url, point, &self.zoning_field)
            .await?;

        let feature = match exactly_one(features)? {
            Some(f) => f,
            None => return Ok(None),
        };

        let code = attr(&feature.attributes, &self.zoning_field)
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(String::from);

        debug!("Zoning layer answered {:?}", code);
        Ok(code)
    }

    async fn lot_area_sf(&self, point: Point<f64>) -> Result<Option<u64>, LookupError> {
        let url = match &self.parcel_url {
            Some(u) => u,
            None => return Ok(None),
        };

        let features = self
            .query_layer(url, point, "lot_area,lot_area_sqm")
            .await?;

        let feature = exactly_one(features)?.ok_or(LookupError::NoMatch)?;

        match area_from_attributes(&feature.attributes) {
            Some(area) => Ok(Some(area)),
            None => {
                debug!("Parcel feature carried no usable area attribute");
                Err(LookupError::NoMatch)
            }
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}
