//! ArcGIS boundary source tests against a mocked layer server.

use geo::Point;
use httpmock::prelude::*;
use serde_json::json;

use arbutus::sources::{ArcGisSource, BoundarySource};
use arbutus::LookupError;

fn source(server: &MockServer, with_parcel: bool) -> ArcGisSource {
    let parcel_url = server.url("/parcel/query");
    ArcGisSource::new(
        &server.url("/zoning/query"),
        "zoning_district",
        with_parcel.then_some(parcel_url.as_str()),
        "arbutus-tests",
        5,
        "ArcGIS",
    )
    .unwrap()
}

fn point() -> Point<f64> {
    Point::new(-123.12, 49.28)
}

#[tokio::test]
async fn test_single_feature_resolves_code() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/zoning/query")
            .query_param("f", "json")
            .query_param("geometry", "-123.12,49.28")
            .query_param("geometryType", "esriGeometryPoint")
            .query_param("inSR", "4326")
            .query_param("spatialRel", "esriSpatialRelIntersects")
            .query_param("returnGeometry", "false");
        then.status(200).json_body(json!({
            "features": [{ "attributes": { "ZONING_DISTRICT": "RT-1" } }]
        }));
    });

    let code = source(&server, false).zoning_code(point()).await.unwrap();
    assert_eq!(code.as_deref(), Some("RT-1"));
    mock.assert();
}

#[tokio::test]
async fn test_zero_features_is_a_miss() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/zoning/query");
        then.status(200).json_body(json!({ "features": [] }));
    });

    let code = source(&server, false).zoning_code(point()).await.unwrap();
    assert!(code.is_none());
}

#[tokio::test]
async fn test_two_features_are_ambiguous() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/zoning/query");
        then.status(200).json_body(json!({
            "features": [
                { "attributes": { "zoning_district": "RT-1" } },
                { "attributes": { "zoning_district": "C-2" } }
            ]
        }));
    });

    let err = source(&server, false).zoning_code(point()).await.unwrap_err();
    assert!(matches!(err, LookupError::Ambiguous(2)));
}

#[tokio::test]
async fn test_error_envelope_is_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/zoning/query");
        then.status(200).json_body(json!({
            "error": { "code": 400, "message": "Invalid query parameters" }
        }));
    });

    let err = source(&server, false).zoning_code(point()).await.unwrap_err();
    assert!(matches!(err, LookupError::DataUnavailable(_)));
}

#[tokio::test]
async fn test_parcel_area_converted_from_square_meters() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/parcel/query");
        then.status(200).json_body(json!({
            "features": [{ "attributes": { "LOT_AREA_SQM": 500.0 } }]
        }));
    });

    let area = source(&server, true).lot_area_sf(point()).await.unwrap();
    assert_eq!(area, Some(5382));
}

#[tokio::test]
async fn test_parcel_area_in_square_feet_used_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/parcel/query");
        then.status(200).json_body(json!({
            "features": [{ "attributes": { "LOT_AREA": 6000.4, "LOT_AREA_SQM": 500.0 } }]
        }));
    });

    let area = source(&server, true).lot_area_sf(point()).await.unwrap();
    assert_eq!(area, Some(6000));
}

#[tokio::test]
async fn test_parcel_miss_fails_the_lookup() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/parcel/query");
        then.status(200).json_body(json!({ "features": [] }));
    });

    let err = source(&server, true).lot_area_sf(point()).await.unwrap_err();
    assert!(matches!(err, LookupError::NoMatch));
}

#[tokio::test]
async fn test_no_parcel_layer_means_no_area() {
    let server = MockServer::start();

    let area = source(&server, false).lot_area_sf(point()).await.unwrap();
    assert!(area.is_none());
}
