use ::geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{json, Map};

pub fn point_feature(code: &str, lon: f64, lat: f64) -> Feature {
    let geometry = Geometry::new(Value::Point(vec![lon, lat]));
    let mut properties = Map::new();
    properties.insert("meta".to_string(), json!({ "Code": code }));
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

pub fn bundle_json(requests: Vec<Feature>, driving_cluster_requests: Vec<Feature>) -> String {
    json!({
        "requests": collection(requests),
        "drivingClusterRequests": collection(driving_cluster_requests),
    })
    .to_string()
}
