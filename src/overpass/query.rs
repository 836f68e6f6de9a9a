use crate::types::BoundingBox;

pub const LANDUSE_KEY: &str = "landuse";
pub const LANDUSE_VALUE: &str = "industrial";
pub const DEFAULT_SERVER_TIMEOUT: u32 = 3000;

/// Builds the Overpass QL selecting industrial ways and relations, recursing
/// down to their members so every ring comes back with full geometry.
///
/// Without a bounding box the query covers the whole planet.
pub fn build_query(bbox: Option<&BoundingBox>, server_timeout: u32) -> String {
    let filter = bbox.map(BoundingBox::to_overpass_filter).unwrap_or_default();
    format!(
        r#"[out:json][timeout:{timeout}];
(
  way["{key}"="{value}"]{filter};
  relation["{key}"="{value}"]{filter};
);
(._;>;);
out geom;
"#,
        timeout = server_timeout,
        key = LANDUSE_KEY,
        value = LANDUSE_VALUE,
        filter = filter,
    )
}
