use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A geographic extent in degrees, in Overpass order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Builds a box, rejecting non-finite values, out of range coordinates
    /// and inverted or empty extents.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        if ![south, west, north, east].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidBbox("coordinates must be finite numbers".into()));
        }
        if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
            return Err(Error::InvalidBbox(format!(
                "latitudes must be within [-90, 90], got south={south}, north={north}"
            )));
        }
        if !(-180.0..=180.0).contains(&west) || !(-180.0..=180.0).contains(&east) {
            return Err(Error::InvalidBbox(format!(
                "longitudes must be within [-180, 180], got west={west}, east={east}"
            )));
        }
        if south >= north {
            return Err(Error::InvalidBbox(format!("south ({south}) must be less than north ({north})")));
        }
        if west >= east {
            return Err(Error::InvalidBbox(format!("west ({west}) must be less than east ({east})")));
        }
        Ok(Self { south, west, north, east })
    }

    /// The `(s,w,n,e)` filter Overpass QL expects after a statement.
    pub fn to_overpass_filter(&self) -> String {
        format!("({},{},{},{})", self.south, self.west, self.north, self.east)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "South={}, West={}, North={}, East={}",
            self.south, self.west, self.north, self.east
        )
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    /// Parses `"south,west,north,east"`.
    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| Error::InvalidBbox(format!("'{}': {}", part.trim(), e)))
            })
            .collect::<Result<Vec<f64>>>()?;

        match values.as_slice() {
            &[south, west, north, east] => Self::new(south, west, north, east),
            _ => Err(Error::InvalidBbox(format!(
                "Bounding box must have 4 coordinates, got {}",
                values.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_south_west_north_east() {
        let bbox: BoundingBox = "52.0, 4.0,52.1,4.1".parse().unwrap();
        assert_eq!(bbox, BoundingBox { south: 52.0, west: 4.0, north: 52.1, east: 4.1 });
        assert_eq!(bbox.to_overpass_filter(), "(52,4,52.1,4.1)");
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(matches!("1,2,3".parse::<BoundingBox>(), Err(Error::InvalidBbox(_))));
        assert!(matches!("1,2,3,4,5".parse::<BoundingBox>(), Err(Error::InvalidBbox(_))));
    }

    #[test]
    fn rejects_garbage() {
        assert!("52.0,abc,52.1,4.1".parse::<BoundingBox>().is_err());
        assert!("".parse::<BoundingBox>().is_err());
        assert!("NaN,4.0,52.1,4.1".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn rejects_inverted_or_out_of_range() {
        assert!("52.1,4.0,52.0,4.1".parse::<BoundingBox>().is_err());
        assert!("52.0,4.1,52.1,4.0".parse::<BoundingBox>().is_err());
        assert!("52.0,4.0,52.0,4.1".parse::<BoundingBox>().is_err());
        assert!("-91,4.0,52.0,4.1".parse::<BoundingBox>().is_err());
        assert!("50,-181,52.0,4.1".parse::<BoundingBox>().is_err());
    }
}
