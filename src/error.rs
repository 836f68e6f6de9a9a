use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
    #[error("Overpass error: {0}")]
    Overpass(String),
    #[error("Geocoding error: {0}")]
    Geocode(String),
    #[error("Invalid geometry: {0}")]
    Geometry(String),
    #[error("Projection error: {0}")]
    Projection(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
