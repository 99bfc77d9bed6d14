use super::geojson::{Entity, Geometry};
use super::map::MapViewModel;
use serde_json::{to_string, to_string_pretty, Map, Value};
use std::error::Error;
use std::io::Write;

pub trait Output {
    fn write_json(&self, writer: &mut dyn Write, pretty: bool) -> Result<(), Box<dyn Error>>;
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
}

fn role(name: &str) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert("role".into(), Value::from(name));
    properties
}

impl Output for MapViewModel {
    fn write_json(&self, writer: &mut dyn Write, pretty: bool) -> Result<(), Box<dyn Error>> {
        let json = if pretty {
            to_string_pretty(self)
        } else {
            to_string(self)
        }?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }

    /// Bounds, center and the matched request as one FeatureCollection.
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        let mut features = vec![
            Entity::Feature {
                properties: role("bounds"),
                geometry: Geometry::Polygon {
                    coordinates: vec![self.bounds.ring()],
                },
            },
            Entity::Feature {
                properties: role("center"),
                geometry: Geometry::Point {
                    coordinates: self.center.into(),
                },
            },
        ];
        if let Some(request) = &self.matched_request {
            let mut properties = request.meta.clone();
            properties.extend(role("matchedRequest"));
            properties.insert("collection".into(), Value::from(request.collection.name()));
            features.push(Entity::Feature {
                properties,
                geometry: Geometry::Point {
                    coordinates: request.location.into(),
                },
            });
        }
        let feature_collection = Entity::FeatureCollection { features };
        let string = to_string(&feature_collection)?;
        writeln!(writer, "{}", string)?;
        Ok(())
    }
}
