use super::error::{Error, Malformation, Result};
use super::geo::GeoPoint;
use super::items::{Collection, GeoData, RequestFeature};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: (f64, f64),
    },
    Polygon {
        coordinates: Vec<Vec<(f64, f64)>>,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entity {
    Feature {
        properties: Map<String, Value>,
        geometry: Geometry,
    },
    FeatureCollection {
        features: Vec<Entity>,
    },
}

/// The geo data bundle as it arrives, before validation.
#[derive(Deserialize)]
pub struct Bundle {
    pub requests: RawCollection,
    #[serde(rename = "drivingClusterRequests")]
    pub driving_cluster_requests: RawCollection,
}

#[derive(Deserialize)]
pub struct RawCollection {
    #[serde(default)]
    pub features: Vec<Value>,
}

/// A feature as decoded, kept untyped so shape errors can be reported per feature.
struct RawFeature(Value);

impl RawFeature {
    fn point(&self) -> std::result::Result<GeoPoint, Malformation> {
        let geometry = match self.0.get("geometry") {
            Some(geometry) if !geometry.is_null() => geometry,
            _ => return Err(Malformation::MissingGeometry),
        };
        match geometry.get("type").and_then(Value::as_str) {
            Some("Point") => {}
            Some(kind) => return Err(Malformation::UnsupportedGeometry(kind.to_string())),
            None => return Err(Malformation::MissingGeometryType),
        }
        let position: Vec<f64> = geometry
            .get("coordinates")
            .and_then(Value::as_array)
            .map(|values| values.iter().map_while(Value::as_f64).collect())
            .unwrap_or_default();
        // a third element (elevation) is ignored
        let (lon, lat) = match position.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => return Err(Malformation::MissingCoordinates(position.len())),
        };
        let point = GeoPoint::new(lon, lat);
        if !point.is_valid() {
            return Err(Malformation::CoordinatesOutOfRange(lon, lat));
        }
        Ok(point)
    }

    fn into_request(
        self,
        collection: Collection,
    ) -> std::result::Result<RequestFeature, Malformation> {
        let location = self.point()?;
        let meta = match self.0 {
            Value::Object(mut feature) => match feature.remove("properties") {
                Some(Value::Object(mut properties)) => properties.remove("meta"),
                _ => None,
            },
            _ => None,
        };
        let meta = match meta {
            Some(Value::Object(meta)) => meta,
            _ => return Err(Malformation::MissingCode),
        };
        let code = match meta.get("Code").and_then(Value::as_str) {
            Some(code) if !code.is_empty() => code.into(),
            _ => return Err(Malformation::MissingCode),
        };
        Ok(RequestFeature {
            code,
            collection,
            location,
            meta,
        })
    }
}

impl RawCollection {
    fn decode(self, collection: Collection) -> Result<Vec<RequestFeature>> {
        self.features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| {
                RawFeature(feature)
                    .into_request(collection)
                    .map_err(|reason| Error::MalformedFeature {
                        collection,
                        index,
                        reason,
                    })
            })
            .collect()
    }
}

impl Bundle {
    /// Validate every feature, failing on the first malformed one.
    pub fn decode(self) -> Result<GeoData> {
        let requests = self.requests.decode(Collection::Requests)?;
        let driving_cluster_requests = self
            .driving_cluster_requests
            .decode(Collection::DrivingClusterRequests)?;
        Ok(GeoData {
            requests,
            driving_cluster_requests,
        })
    }
}
