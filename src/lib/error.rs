use super::items::Collection;
use thiserror::Error;

/// Why a feature of the geo data bundle was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Malformation {
    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("geometry has no type")]
    MissingGeometryType,

    #[error("expected a Point geometry, got: {0}")]
    UnsupportedGeometry(String),

    #[error("point needs a longitude and a latitude, got {0} coordinate(s)")]
    MissingCoordinates(usize),

    #[error("coordinates out of range: [{0}, {1}]")]
    CoordinatesOutOfRange(f64, f64),

    #[error("feature has no meta.Code string")]
    MissingCode,
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("feature {index} of {collection} is malformed: {reason}")]
    MalformedFeature {
        collection: Collection,
        index: usize,
        reason: Malformation,
    },

    #[error("could not decode geo data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read geo data: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
