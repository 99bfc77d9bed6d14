//! Map view data for geotagged delivery requests.
//!
//! Decodes a bundle of two GeoJSON feature collections (`requests` and
//! `drivingClusterRequests`), resolves the request highlighted by a URL query
//! and computes a viewport that covers the home region and every request.
//!
//! ```
//! use request_map::{assemble, GeoData};
//!
//! let data: GeoData = r#"{
//!     "requests": { "type": "FeatureCollection", "features": [{
//!         "type": "Feature",
//!         "geometry": { "type": "Point", "coordinates": [-73.9, 40.67] },
//!         "properties": { "meta": { "Code": "Z" } }
//!     }] },
//!     "drivingClusterRequests": { "type": "FeatureCollection", "features": [] }
//! }"#
//! .parse()
//! .unwrap();
//!
//! let model = assemble(&data, "request=Q");
//! assert!(model.matched_request.is_none());
//! assert_eq!(model.request_code_not_found.as_deref(), Some("Q"));
//! ```
use self::geojson::Bundle;
use itertools::Itertools;
use std::io::Read;
use tracing::{debug, warn};

pub mod error;
pub mod geo;
mod geojson;
pub mod items;
pub mod map;
pub mod output;
pub mod request;
#[cfg(test)]
mod test_helpers;

pub use self::error::{Error, Malformation, Result};
pub use self::geo::{compute_bounds, BoundingRegion, GeoPoint};
pub use self::items::{Collection, GeoData, RequestFeature};
pub use self::map::{
    assemble, assemble_optional, ClusterConfig, ClusterSource, HomeRegion, MapDataAssembler,
    MapViewModel, CLUSTER_MAX_ZOOM, CLUSTER_RADIUS,
};
pub use self::request::{extract_request_code, resolve_request, search_of};

/// Read and validate a geo data bundle.
///
/// Fails with [`Error::MalformedFeature`] on the first feature lacking a point
/// geometry or a `Code`.
pub fn load(reader: impl Read) -> Result<GeoData> {
    let bundle: Bundle = serde_json::from_reader(reader)?;
    let data = bundle.decode()?;
    debug!(
        requests = data.requests.len(),
        driving_cluster_requests = data.driving_cluster_requests.len(),
        "geo data loaded"
    );
    let shared = data.shared_codes();
    if !shared.is_empty() {
        warn!(
            "codes present in both collections resolve to requests: {}",
            shared.iter().join(", ")
        );
    }
    Ok(data)
}
