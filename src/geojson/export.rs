use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::json;
use tracing::{info, warn};

use crate::{error::Result, types::BoundingBox};

pub const DEFAULT_OUTPUT: &str = "large_industrial_areas.geojson";

/// Run summary written into the collection's top level `properties`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportMetadata {
    pub min_area_sqm: f64,
    pub country: Option<String>,
    pub bbox: Option<BoundingBox>,
    /// Timestamp of the OSM data Overpass answered from.
    pub osm_base: Option<String>,
}

impl ExportMetadata {
    pub fn to_properties(&self, count: usize) -> JsonObject {
        let mut properties = JsonObject::new();
        properties.insert(
            "description".into(),
            json!(format!("Industrial areas >= {:?} sqm", self.min_area_sqm)),
        );
        properties.insert("count".into(), json!(count));
        properties.insert("min_area_sqm".into(), json!(self.min_area_sqm));
        if let Some(country) = &self.country {
            properties.insert("country".into(), json!(country));
        }
        if let Some(bbox) = &self.bbox {
            properties.insert(
                "bounding_box".into(),
                json!({
                    "south": bbox.south,
                    "west": bbox.west,
                    "north": bbox.north,
                    "east": bbox.east,
                }),
            );
        }
        if let Some(osm_base) = &self.osm_base {
            properties.insert("osm_base".into(), json!(osm_base));
        }
        properties
    }
}

/// Writes `features` as a pretty printed FeatureCollection to `path`.
///
/// Nothing is written when there are no features; that returns `Ok(None)`.
pub fn export_geojson(
    features: &[Feature],
    metadata: &ExportMetadata,
    path: &Path,
) -> Result<Option<PathBuf>> {
    if features.is_empty() {
        warn!("No features to export");
        return Ok(None);
    }

    let collection = FeatureCollection {
        bbox: None,
        features: features.to_vec(),
        foreign_members: Some(
            [("properties".to_string(), json!(metadata.to_properties(features.len())))]
                .into_iter()
                .collect(),
        ),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &collection)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    let country_info = metadata
        .country
        .as_ref()
        .map(|c| format!(" in {}", c))
        .unwrap_or_default();
    info!("Exported {} features{} to {}", features.len(), country_info, path.display());
    Ok(Some(path.to_path_buf()))
}
