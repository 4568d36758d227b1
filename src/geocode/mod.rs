//! Address geocoding.

mod nominatim;

pub use nominatim::NominatimGeocoder;

use async_trait::async_trait;
use geo::Point;

/// Maps a free-text address to a WGS84 point.
///
/// Adapters collapse every failure mode (transport errors, empty result
/// lists, malformed payloads) into `None`; nothing propagates past this
/// boundary.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Option<Point<f64>>;
}
