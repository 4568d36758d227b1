//! Nominatim (OpenStreetMap) geocoder adapter.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use geo::Point;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::Geocoder;

/// Geocodes addresses against a Nominatim search endpoint.
pub struct NominatimGeocoder {
    client: Client,
    url: Url,
    /// Locality context appended to every query, e.g. "Vancouver, BC".
    suffix: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    // Nominatim returns coordinates as strings
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    /// Create a new geocoder.
    ///
    /// `user_agent` is a static identification header required by the
    /// Nominatim usage policy.
    pub fn new(url: &str, user_agent: &str, suffix: &str, timeout_secs: u64) -> Result<Self> {
        let url = Url::parse(url).context("Invalid geocoder URL")?;

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build geocoder HTTP client")?;

        Ok(Self {
            client,
            url,
            suffix: suffix.to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Option<Point<f64>> {
        let query = if self.suffix.is_empty() {
            address.to_string()
        } else {
            format!("{}, {}", address, self.suffix)
        };

        let response = match self
            .client
            .get(self.url.clone())
            .query(&[("format", "json"), ("limit", "1"), ("q", query.as_str())])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Geocoder request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Geocoder returned status {}", response.status());
            return None;
        }

        let places: Vec<NominatimPlace> = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to parse geocoder response: {}", e);
                return None;
            }
        };

        let place = places.first()?;

        match (place.lon.parse::<f64>(), place.lat.parse::<f64>()) {
            (Ok(lon), Ok(lat)) => {
                debug!("Geocoded {:?} to ({}, {})", address, lon, lat);
                Some(Point::new(lon, lat))
            }
            _ => {
                debug!("Geocoder returned non-numeric coordinates for {:?}", address);
                None
            }
        }
    }
}
