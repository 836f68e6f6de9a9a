use crate::types::{LatLon, Relation, Ring, Way};

pub fn way_ring(way: &Way) -> Ring {
    to_ring(&way.geometry)
}

fn to_ring(points: &[LatLon]) -> Ring {
    points.iter().copied().map(Into::into).collect()
}

/// Rings of a multipolygon relation, split by member role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationRings {
    pub outer: Vec<Ring>,
    pub inner: Vec<Ring>,
}

impl RelationRings {
    /// Outer rings followed by inner rings.
    pub fn into_rings(self) -> Vec<Ring> {
        let mut rings = self.outer;
        rings.extend(self.inner);
        rings
    }

    /// The outer ring with the most points, standing in for the whole relation.
    /// Ties go to the first such ring; holes and other outer rings are dropped.
    pub fn representative(&self) -> Option<&Ring> {
        self.outer
            .iter()
            .reduce(|best, ring| if ring.len() > best.len() { ring } else { best })
    }
}

/// Collects the `outer` and `inner` member rings of a relation. Members
/// without geometry, rings under 3 points and other roles are skipped.
pub fn relation_rings(relation: &Relation) -> RelationRings {
    let mut rings = RelationRings::default();
    for member in &relation.members {
        let Some(geometry) = member.geometry.as_deref() else {
            continue;
        };
        if geometry.len() < 3 {
            continue;
        }
        match member.role.as_str() {
            "outer" => rings.outer.push(to_ring(geometry)),
            "inner" => rings.inner.push(to_ring(geometry)),
            _ => {}
        }
    }
    rings
}
