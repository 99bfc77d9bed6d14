use super::error::{Error, Result};
use super::geo::GeoPoint;
use super::geojson::Bundle;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smartstring::alias::String;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The two feature collections of a geo data bundle.
///
/// Variants are declared in search precedence: a code present in both
/// collections resolves to the `Requests` feature.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Requests,
    DrivingClusterRequests,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Requests, Collection::DrivingClusterRequests];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Requests => "requests",
            Collection::DrivingClusterRequests => "drivingClusterRequests",
        }
    }

    /// Id of the clustered point source the renderer creates for this collection.
    pub fn source_id(self) -> &'static str {
        match self {
            Collection::Requests => "requestsSource",
            Collection::DrivingClusterRequests => "drivingClusterRequestsSource",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequestFeature {
    pub code: String,
    pub collection: Collection,
    pub location: GeoPoint,
    pub meta: Map<std::string::String, Value>,
}

impl RequestFeature {
    pub fn new(code: &str, collection: Collection, location: GeoPoint) -> Self {
        let mut meta = Map::new();
        meta.insert("Code".into(), Value::from(code));
        RequestFeature {
            code: code.into(),
            collection,
            location,
            meta,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoData {
    pub requests: Vec<RequestFeature>,
    pub driving_cluster_requests: Vec<RequestFeature>,
}

impl GeoData {
    pub fn collection(&self, collection: Collection) -> &[RequestFeature] {
        match collection {
            Collection::Requests => &self.requests,
            Collection::DrivingClusterRequests => &self.driving_cluster_requests,
        }
    }

    /// Both collections, in search precedence.
    pub fn collections(&self) -> [&[RequestFeature]; 2] {
        [
            self.collection(Collection::ALL[0]),
            self.collection(Collection::ALL[1]),
        ]
    }

    pub fn features(&self) -> impl Iterator<Item = &RequestFeature> {
        self.requests.iter().chain(&self.driving_cluster_requests)
    }

    pub fn len(&self) -> usize {
        self.requests.len() + self.driving_cluster_requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Codes present in both collections.
    pub fn shared_codes(&self) -> Vec<&str> {
        let requested: HashSet<&str> = self.requests.iter().map(|f| f.code.as_str()).collect();
        self.driving_cluster_requests
            .iter()
            .map(|f| f.code.as_str())
            .filter(|code| requested.contains(code))
            .unique()
            .collect()
    }
}

impl FromStr for GeoData {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bundle: Bundle = serde_json::from_str(s)?;
        bundle.decode()
    }
}
