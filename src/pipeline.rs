//! The lookup pipeline: validate, geocode, resolve, format.

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::{Config, ZoningProvider};
use crate::error::LookupError;
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::models::LookupResult;
use crate::sources::{ArcGisSource, BoundarySource, OpenDataSource};

/// Address-to-zoning lookup service.
///
/// Stateless across requests apart from read-only configuration; every
/// call fetches fresh upstream data.
pub struct LookupService {
    geocoder: Box<dyn Geocoder>,
    source: Box<dyn BoundarySource>,
}

impl LookupService {
    pub fn new(geocoder: Box<dyn Geocoder>, source: Box<dyn BoundarySource>) -> Self {
        Self { geocoder, source }
    }

    /// Build the service from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let geocoder = NominatimGeocoder::new(
            &config.geocoder.url,
            &config.geocoder.user_agent,
            &config.geocoder.suffix,
            config.geocoder.timeout_secs,
        )?;

        let source: Box<dyn BoundarySource> = match config.zoning.provider {
            ZoningProvider::Opendata => Box::new(OpenDataSource::new(
                &config.zoning.url,
                &config.geocoder.user_agent,
                config.zoning.timeout_secs,
                config.zoning.match_policy,
                &config.lookup.data_source,
            )?),
            ZoningProvider::Arcgis => Box::new(ArcGisSource::new(
                &config.zoning.url,
                &config.zoning.zoning_field,
                config.parcel.as_ref().map(|p| p.url.as_str()),
                &config.geocoder.user_agent,
                config.zoning.timeout_secs,
                &config.lookup.data_source,
            )?),
        };

        Ok(Self::new(Box::new(geocoder), source))
    }

    pub fn data_source(&self) -> &str {
        self.source.label()
    }

    /// Run the full lookup, collapsing every failure into `not_found`.
    pub async fn lookup(&self, address: &str) -> LookupResult {
        self.lookup_detailed(address).await.0
    }

    /// Like [`lookup`](Self::lookup), but also exposes which pipeline
    /// stage failed so the transport layer can map status codes when
    /// verbose reporting is enabled. The body shape is identical either way.
    pub async fn lookup_detailed(&self, address: &str) -> (LookupResult, Option<LookupError>) {
        match self.run(address).await {
            Ok(result) => (result, None),
            Err(e) => {
                match &e {
                    LookupError::DataUnavailable(_) => warn!("Lookup failed: {}", e),
                    _ => debug!("Lookup failed: {}", e),
                }
                (LookupResult::not_found(self.source.label()), Some(e))
            }
        }
    }

    async fn run(&self, address: &str) -> Result<LookupResult, LookupError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(LookupError::InvalidInput);
        }

        let point = self
            .geocoder
            .geocode(address)
            .await
            .ok_or(LookupError::GeocodeMiss)?;

        let code = self
            .source
            .zoning_code(point)
            .await?
            .ok_or(LookupError::NoMatch)?;

        // Independent of the zoning query; could be issued concurrently.
        let lot_area_sf = self.source.lot_area_sf(point).await?;

        debug!("Resolved {:?} to zoning {}", address, code);
        Ok(LookupResult::success(code, lot_area_sf, self.source.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LookupStatus, ZoningRecord};
    use crate::resolve::MatchPolicy;
    use crate::sources::FixedSource;
    use async_trait::async_trait;
    use geo::{Coord, LineString, MultiPolygon, Point, Polygon};

    struct StubGeocoder(Option<Point<f64>>);

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _address: &str) -> Option<Point<f64>> {
            self.0
        }
    }

    /// One district around downtown Vancouver.
    fn rt1_records() -> Vec<ZoningRecord> {
        let ring = LineString::new(vec![
            Coord { x: -123.2, y: 49.2 },
            Coord { x: -123.0, y: 49.2 },
            Coord { x: -123.0, y: 49.3 },
            Coord { x: -123.2, y: 49.3 },
            Coord { x: -123.2, y: 49.2 },
        ]);
        vec![ZoningRecord {
            code: "RT-1".to_string(),
            boundary: MultiPolygon::new(vec![Polygon::new(ring, vec![])]),
        }]
    }

    fn service(geocoder: StubGeocoder, source: FixedSource) -> LookupService {
        LookupService::new(Box::new(geocoder), Box::new(source))
    }

    #[tokio::test]
    async fn test_empty_address_is_not_found() {
        let svc = service(
            StubGeocoder(Some(Point::new(-123.12, 49.28))),
            FixedSource::new(rt1_records(), MatchPolicy::FirstMatch, "test"),
        );

        let (result, error) = svc.lookup_detailed("   ").await;
        assert_eq!(result.lookup_status, LookupStatus::NotFound);
        assert!(result.zoning_code.is_none());
        assert!(result.lot_area_sf.is_none());
        assert!(matches!(error, Some(LookupError::InvalidInput)));
    }

    #[tokio::test]
    async fn test_geocode_miss_is_not_found() {
        let svc = service(
            StubGeocoder(None),
            FixedSource::new(rt1_records(), MatchPolicy::FirstMatch, "test"),
        );

        let (result, error) = svc.lookup_detailed("123 Main St").await;
        assert_eq!(result.lookup_status, LookupStatus::NotFound);
        assert!(matches!(error, Some(LookupError::GeocodeMiss)));
    }

    #[tokio::test]
    async fn test_successful_lookup() {
        let svc = service(
            StubGeocoder(Some(Point::new(-123.12, 49.28))),
            FixedSource::new(rt1_records(), MatchPolicy::FirstMatch, "test"),
        );

        let result = svc.lookup("123 Main St").await;
        assert_eq!(result.lookup_status, LookupStatus::Success);
        assert_eq!(result.zoning_code.as_deref(), Some("RT-1"));
        assert!(result.lot_area_sf.is_none());
        assert_eq!(result.data_source, "test");
    }

    #[tokio::test]
    async fn test_lookup_with_lot_area() {
        let svc = service(
            StubGeocoder(Some(Point::new(-123.12, 49.28))),
            FixedSource::new(rt1_records(), MatchPolicy::FirstMatch, "test")
                .with_lot_area(5382),
        );

        let result = svc.lookup("123 Main St").await;
        assert_eq!(result.lot_area_sf, Some(5382));
    }

    #[tokio::test]
    async fn test_point_outside_all_districts() {
        let svc = service(
            StubGeocoder(Some(Point::new(0.0, 0.0))),
            FixedSource::new(rt1_records(), MatchPolicy::FirstMatch, "test"),
        );

        let (result, error) = svc.lookup_detailed("somewhere far away").await;
        assert_eq!(result.lookup_status, LookupStatus::NotFound);
        assert!(matches!(error, Some(LookupError::NoMatch)));
    }

    #[tokio::test]
    async fn test_repeated_lookups_are_identical() {
        let svc = service(
            StubGeocoder(Some(Point::new(-123.12, 49.28))),
            FixedSource::new(rt1_records(), MatchPolicy::FirstMatch, "test"),
        );

        let first = svc.lookup("123 Main St").await;
        let second = svc.lookup("123 Main St").await;
        assert_eq!(first.lookup_status, second.lookup_status);
        assert_eq!(first.zoning_code, second.zoning_code);
        assert_eq!(first.lot_area_sf, second.lot_area_sf);
    }
}
