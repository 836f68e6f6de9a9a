//! Finds large industrial areas in OpenStreetMap.
//!
//! Industrial ways and relations are fetched from Overpass, measured in the
//! UTM zone of their centroid, filtered by area and written out as GeoJSON.

pub mod apis;
pub mod cli;
pub mod error;
pub mod filter;
pub mod geojson;
pub mod overpass;
pub mod projection;
pub mod settings;
pub mod types;

pub use error::{Error, Result};
