use geo::prelude::*;
use geo_types::{Coordinate, MultiPoint, Point, Rect};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseGeoError {
    #[error("expected {0} comma separated numbers")]
    Arity(usize),

    #[error("not a number: {0}")]
    Number(String),

    #[error("coordinates out of range")]
    OutOfRange,

    #[error("south-west corner lies north or east of the north-east corner")]
    Inverted,
}

fn parse_numbers(s: &str, arity: usize) -> Result<Vec<f64>, ParseGeoError> {
    let numbers = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| ParseGeoError::Number(part.to_string()))
        })
        .collect::<Result<Vec<f64>, _>>()?;
    if numbers.len() != arity {
        return Err(ParseGeoError::Arity(arity));
    }
    Ok(numbers)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        GeoPoint { lon, lat }
    }

    /// Whether both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Parses `lon,lat`.
impl FromStr for GeoPoint {
    type Err = ParseGeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbers = parse_numbers(s, 2)?;
        let point = GeoPoint::new(numbers[0], numbers[1]);
        if !point.is_valid() {
            return Err(ParseGeoError::OutOfRange);
        }
        Ok(point)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lon, point.lat)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Point::new(point.lon, point.lat)
    }
}

impl From<Coordinate<f64>> for GeoPoint {
    fn from(coordinate: Coordinate<f64>) -> Self {
        GeoPoint {
            lon: coordinate.x,
            lat: coordinate.y,
        }
    }
}

/// Axis-aligned rectangle given by its south-west and north-east corners.
///
/// Longitudes are compared numerically, a region never wraps around the
/// antimeridian.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    pub sw: GeoPoint,
    pub ne: GeoPoint,
}

impl BoundingRegion {
    pub const fn new(sw: GeoPoint, ne: GeoPoint) -> Self {
        BoundingRegion { sw, ne }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lon >= self.sw.lon
            && point.lon <= self.ne.lon
            && point.lat >= self.sw.lat
            && point.lat <= self.ne.lat
    }

    pub fn contains_region(&self, other: &BoundingRegion) -> bool {
        self.contains(&other.sw) && self.contains(&other.ne)
    }

    /// Closed exterior ring, counter-clockwise from the south-west corner.
    pub fn ring(&self) -> Vec<(f64, f64)> {
        vec![
            (self.sw.lon, self.sw.lat),
            (self.ne.lon, self.sw.lat),
            (self.ne.lon, self.ne.lat),
            (self.sw.lon, self.ne.lat),
            (self.sw.lon, self.sw.lat),
        ]
    }
}

/// Parses `sw_lon,sw_lat,ne_lon,ne_lat`.
impl FromStr for BoundingRegion {
    type Err = ParseGeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbers = parse_numbers(s, 4)?;
        let sw = GeoPoint::new(numbers[0], numbers[1]);
        let ne = GeoPoint::new(numbers[2], numbers[3]);
        if !sw.is_valid() || !ne.is_valid() {
            return Err(ParseGeoError::OutOfRange);
        }
        if sw.lon > ne.lon || sw.lat > ne.lat {
            return Err(ParseGeoError::Inverted);
        }
        Ok(BoundingRegion { sw, ne })
    }
}

impl From<Rect<f64>> for BoundingRegion {
    fn from(rect: Rect<f64>) -> Self {
        BoundingRegion {
            sw: rect.min().into(),
            ne: rect.max().into(),
        }
    }
}

/// Grow `anchor` until it covers every point.
///
/// The anchor is returned as is when there are no points, otherwise the
/// result is the bounding rectangle of the anchor's corners and the points.
/// Points on opposite sides of the antimeridian yield a region spanning
/// most of the longitude range.
pub fn compute_bounds(anchor: &BoundingRegion, points: &[GeoPoint]) -> BoundingRegion {
    if points.is_empty() {
        return *anchor;
    }
    let corners = [anchor.sw, anchor.ne];
    let multi_point: MultiPoint<f64> = corners
        .iter()
        .chain(points)
        .map(|&point| Point::from(point))
        .collect();
    multi_point
        .bounding_rect()
        .map(BoundingRegion::from)
        .unwrap_or(*anchor)
}
