use serde::{Deserialize, Serialize};

pub type Tags = serde_json::Map<String, serde_json::Value>;

// Overpass API, thanks to: https://transform.tools/json-to-rust-serde
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverpassResponse {
    pub version: Option<f64>,
    pub generator: Option<String>,
    pub osm3s: Option<Osm3s>,
    /// Overpass reports server side failures (timeouts, memory) here while still answering 200.
    pub remark: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl OverpassResponse {
    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.elements.iter().filter_map(|e| match e {
            Element::Way(way) => Some(way),
            _ => None,
        })
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.elements.iter().filter_map(|e| match e {
            Element::Relation(relation) => Some(relation),
            _ => None,
        })
    }

    pub fn osm_base(&self) -> Option<&str> {
        self.osm3s.as_ref()?.timestamp_osm_base.as_deref()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Osm3s {
    #[serde(rename = "timestamp_osm_base")]
    pub timestamp_osm_base: Option<String>,
    #[serde(rename = "timestamp_areas_base")]
    pub timestamp_areas_base: Option<String>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Way(Way),
    Relation(Relation),
    #[serde(other)]
    Other,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: i64,
    #[serde(default)]
    pub tags: Tags,
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub nodes: Vec<i64>,
    #[serde(default)]
    pub geometry: Vec<LatLon>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: i64,
    #[serde(default)]
    pub tags: Tags,
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub type_field: String,
    #[serde(rename = "ref")]
    pub reference: i64,
    #[serde(default)]
    pub role: String,
    /// Only set for way members when the query asked for `out geom`.
    pub geometry: Option<Vec<LatLon>>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<LatLon> for geo::Coord<f64> {
    fn from(p: LatLon) -> Self {
        geo::Coord { x: p.lon, y: p.lat }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub minlat: f64,
    pub minlon: f64,
    pub maxlat: f64,
    pub maxlon: f64,
}

/// The two element kinds that can become features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Way,
    Relation,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
