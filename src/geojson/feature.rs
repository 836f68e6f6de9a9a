use geojson::{Feature, Geometry, JsonObject, Value};
use serde_json::json;

use crate::{
    overpass::LANDUSE_VALUE,
    projection::{SQM_PER_HECTARE, round2},
    types::{ElementKind, Ring, Tags},
};

/// Appends the first point unless the ring already ends on it.
pub fn close_ring(ring: &mut Ring) {
    if let Some(&first) = ring.first() {
        if ring.last() != Some(&first) {
            ring.push(first);
        }
    }
}

/// Builds the output feature for one retained element.
///
/// The computed properties come first; OSM tags are copied after them and
/// never replace one of them.
pub fn build_feature(kind: ElementKind, id: i64, tags: &Tags, mut ring: Ring, area: f64) -> Feature {
    close_ring(&mut ring);

    let mut properties = JsonObject::new();
    properties.insert("osm_id".into(), json!(id));
    properties.insert("osm_type".into(), json!(kind.as_str()));
    properties.insert("landuse".into(), json!(LANDUSE_VALUE));
    properties.insert("area_sqm".into(), json!(round2(area)));
    properties.insert("area_hectares".into(), json!(round2(area / SQM_PER_HECTARE)));
    for (key, value) in tags {
        if !properties.contains_key(key) {
            properties.insert(key.clone(), value.clone());
        }
    }

    let exterior = ring.iter().map(|c| vec![c.x, c.y]).collect();
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![exterior]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
