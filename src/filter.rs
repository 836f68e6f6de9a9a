use geojson::Feature;
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    geojson::{build_feature, relation_rings, way_ring},
    projection::{SQM_PER_HECTARE, calculate_area},
    types::{Element, ElementKind, OverpassResponse, Relation, Ring, Tags, Way},
};

pub const DEFAULT_MIN_AREA_SQM: f64 = 10_000.0;

/// Keeps industrial polygons whose ground area reaches a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndustrialFilter {
    pub min_area_sqm: f64,
}

impl Default for IndustrialFilter {
    fn default() -> Self {
        IndustrialFilter::new(DEFAULT_MIN_AREA_SQM)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub processed: usize,
    pub kept: usize,
    pub too_small: usize,
    /// No ring with at least 3 points.
    pub unusable: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Filtered {
    pub features: Vec<Feature>,
    pub report: FilterReport,
}

enum Outcome {
    Kept(Feature),
    TooSmall(f64),
    Unusable,
}

impl IndustrialFilter {
    pub fn new(min_area_sqm: f64) -> Self {
        IndustrialFilter { min_area_sqm }
    }

    /// Inclusive: an area equal to the threshold is kept.
    pub fn retains(&self, area: f64) -> bool {
        area >= self.min_area_sqm
    }

    pub fn filter_response(&self, response: &OverpassResponse) -> Filtered {
        self.filter_elements(&response.elements)
    }

    /// Runs every way, then every relation, through area measurement.
    ///
    /// A failing element is logged and skipped, the rest of the batch goes on.
    pub fn filter_elements(&self, elements: &[Element]) -> Filtered {
        let mut filtered = Filtered::default();

        let ways = elements.iter().filter_map(|e| match e {
            Element::Way(way) => Some((ElementKind::Way, way.id, self.process_way(way))),
            _ => None,
        });
        let relations = elements.iter().filter_map(|e| match e {
            Element::Relation(rel) => Some((ElementKind::Relation, rel.id, self.process_relation(rel))),
            _ => None,
        });

        for (kind, id, outcome) in ways.chain(relations) {
            let report = &mut filtered.report;
            report.processed += 1;
            match outcome {
                Ok(Outcome::Kept(feature)) => {
                    report.kept += 1;
                    filtered.features.push(feature);
                }
                Ok(Outcome::TooSmall(area)) => {
                    report.too_small += 1;
                    debug!("Filtered out {} {}: {:.0} sqm (too small)", kind, id, area);
                }
                Ok(Outcome::Unusable) => {
                    report.unusable += 1;
                    debug!("Skipped {} {}: no usable ring", kind, id);
                }
                Err(e) => {
                    report.failed += 1;
                    warn!("Error processing {} {}: {}", kind, id, e);
                }
            }
        }

        info!(
            "Processed {} elements, kept {} large industrial areas",
            filtered.report.processed, filtered.report.kept
        );
        filtered
    }

    fn process_way(&self, way: &Way) -> Result<Outcome> {
        let ring = way_ring(way);
        if ring.len() < 3 {
            return Ok(Outcome::Unusable);
        }
        self.measure(ElementKind::Way, way.id, &way.tags, ring)
    }

    fn process_relation(&self, relation: &Relation) -> Result<Outcome> {
        let rings = relation_rings(relation);
        match rings.representative() {
            Some(ring) if ring.len() >= 3 => {
                self.measure(ElementKind::Relation, relation.id, &relation.tags, ring.clone())
            }
            _ => Ok(Outcome::Unusable),
        }
    }

    fn measure(&self, kind: ElementKind, id: i64, tags: &Tags, ring: Ring) -> Result<Outcome> {
        let area = calculate_area(&ring)?;
        if !self.retains(area) {
            return Ok(Outcome::TooSmall(area));
        }
        info!(
            "Kept {} {}: {:.0} sqm ({:.2} ha)",
            kind,
            id,
            area,
            area / SQM_PER_HECTARE
        );
        Ok(Outcome::Kept(build_feature(kind, id, tags, ring, area)))
    }
}
