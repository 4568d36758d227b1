//! Service configuration.
//!
//! Loaded from a TOML file; every section is optional and falls back to
//! defaults pointing at the public Vancouver providers.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::resolve::MatchPolicy;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub geocoder: GeocoderConfig,
    pub zoning: ZoningConfig,
    /// Optional ArcGIS parcel layer for lot-area lookup.
    pub parcel: Option<ParcelConfig>,
    pub lookup: LookupConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub url: String,
    /// Static identification header required by the Nominatim usage policy.
    pub user_agent: String,
    /// Locality context appended to every query.
    pub suffix: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "arbutus/0.1 (zoning lookup)".to_string(),
            suffix: "Vancouver, BC".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZoningProvider {
    #[default]
    Opendata,
    Arcgis,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ZoningConfig {
    pub provider: ZoningProvider,
    /// Dataset records URL (opendata) or layer query URL (arcgis).
    pub url: String,
    /// Attribute carrying the zoning code on the ArcGIS layer.
    pub zoning_field: String,
    pub match_policy: MatchPolicy,
    pub timeout_secs: u64,
}

impl Default for ZoningConfig {
    fn default() -> Self {
        Self {
            provider: ZoningProvider::Opendata,
            url: "https://opendata.vancouver.ca/api/explore/v2.1/catalog/datasets/zoning-districts-and-labels/records".to_string(),
            zoning_field: "zoning_district".to_string(),
            match_policy: MatchPolicy::FirstMatch,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ParcelConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Reporting {
    /// Every outcome is HTTP 200; callers branch on `lookup_status`.
    #[default]
    Uniform,
    /// Failures additionally map to 400/404/502 status codes.
    Verbose,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    pub reporting: Reporting,
    /// `data_source` label on every result.
    pub data_source: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            reporting: Reporting::Uniform,
            data_source: "City of Vancouver Open Data".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
