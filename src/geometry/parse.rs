//! GeoJSON geometry parsing into validated `geo` shapes.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;

/// GeoJSON geometry as it appears in provider payloads.
///
/// Only areal geometries are usable for containment tests; any other
/// geometry type deserializes to `Other` and converts to nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Other,
}

impl GeoJsonGeometry {
    /// Convert into a normalized multipolygon.
    ///
    /// Single polygons become one-member multipolygons. Degenerate hole
    /// rings are dropped; a degenerate outer ring drops the whole polygon.
    /// Returns `None` when nothing usable remains.
    pub fn to_boundary(&self) -> Option<MultiPolygon<f64>> {
        match self {
            GeoJsonGeometry::Polygon { coordinates } => {
                polygon_from_rings(coordinates).map(|p| MultiPolygon::new(vec![p]))
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                let polygons: Vec<Polygon<f64>> = coordinates
                    .iter()
                    .filter_map(|rings| polygon_from_rings(rings))
                    .collect();

                if polygons.is_empty() {
                    None
                } else {
                    Some(MultiPolygon::new(polygons))
                }
            }
            GeoJsonGeometry::Other => None,
        }
    }
}

/// Build a polygon from GeoJSON rings (outer first, then holes).
fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let mut iter = rings.iter();
    let exterior = ring_from_positions(iter.next()?)?;
    let holes: Vec<LineString<f64>> = iter.filter_map(|r| ring_from_positions(r)).collect();

    Some(Polygon::new(exterior, holes))
}

/// Build a closed ring from GeoJSON positions.
///
/// Positions carry (lon, lat) in their first two ordinates; anything
/// shorter is skipped. Unclosed rings are closed, and rings with fewer
/// than three distinct points are rejected.
fn ring_from_positions(positions: &[Vec<f64>]) -> Option<LineString<f64>> {
    let mut coords: Vec<Coord<f64>> = positions
        .iter()
        .filter_map(|p| match (p.first(), p.get(1)) {
            (Some(&x), Some(&y)) => Some(Coord { x, y }),
            _ => None,
        })
        .collect();

    if coords.len() < 3 {
        return None;
    }

    // Close the ring if needed
    if coords.first() != coords.last() {
        let first = coords[0];
        coords.push(first);
    }

    if coords.len() < 4 {
        return None;
    }

    Some(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GeoJsonGeometry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_polygon_closed_ring() {
        let geom = parse(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
        }));

        let boundary = geom.to_boundary().unwrap();
        assert_eq!(boundary.0.len(), 1);
        assert_eq!(boundary.0[0].exterior().0.len(), 5);
    }

    #[test]
    fn test_polygon_unclosed_ring_gets_closed() {
        let geom = parse(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]
        }));

        let boundary = geom.to_boundary().unwrap();
        let exterior = boundary.0[0].exterior();
        assert_eq!(exterior.0.first(), exterior.0.last());
    }

    #[test]
    fn test_degenerate_ring_rejected() {
        let geom = parse(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]
        }));

        assert!(geom.to_boundary().is_none());
    }

    #[test]
    fn test_degenerate_hole_dropped() {
        let geom = parse(json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                [[1.0, 1.0], [2.0, 1.0], [1.0, 1.0]]
            ]
        }));

        let boundary = geom.to_boundary().unwrap();
        assert_eq!(boundary.0[0].interiors().len(), 0);
    }

    #[test]
    fn test_multipolygon_keeps_usable_members() {
        let geom = parse(json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]],
                [[[10.0, 10.0], [11.0, 10.0], [11.0, 11.0], [10.0, 11.0], [10.0, 10.0]]]
            ]
        }));

        let boundary = geom.to_boundary().unwrap();
        assert_eq!(boundary.0.len(), 1);
    }

    #[test]
    fn test_extra_ordinates_ignored() {
        let geom = parse(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0, 7.5], [1.0, 0.0, 7.5], [1.0, 1.0, 7.5], [0.0, 0.0, 7.5]]]
        }));

        assert!(geom.to_boundary().is_some());
    }

    #[test]
    fn test_non_areal_geometry_ignored() {
        let geom = parse(json!({
            "type": "Point",
            "coordinates": [0.0, 0.0]
        }));

        assert!(geom.to_boundary().is_none());
    }
}
