use geo::Coord;
use proj4rs::{proj::Proj, transform::transform};

use crate::error::{Error, Result};

const WGS84_LONLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// A UTM zone: a 6° longitude band plus the hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmZone {
    pub number: u8,
    pub north: bool,
}

impl UtmZone {
    /// Picks the zone containing `(lon, lat)`. Longitude 180 falls into zone 60.
    pub fn for_lon_lat(lon: f64, lat: f64) -> Self {
        let number = (((lon + 180.0) / 6.0).floor() as i64 + 1).clamp(1, 60) as u8;
        UtmZone { number, north: lat >= 0.0 }
    }

    pub fn epsg(&self) -> u32 {
        let base = if self.north { 32600 } else { 32700 };
        base + self.number as u32
    }

    pub fn proj_string(&self) -> String {
        let south = if self.north { "" } else { " +south" };
        format!("+proj=utm +zone={}{} +datum=WGS84 +units=m +no_defs", self.number, south)
    }

    pub fn projection(&self) -> Result<UtmProjection> {
        let source = Proj::from_proj_string(WGS84_LONLAT)
            .map_err(|e| Error::Projection(format!("{}: {:?}", WGS84_LONLAT, e)))?;
        let target = Proj::from_proj_string(&self.proj_string())
            .map_err(|e| Error::Projection(format!("EPSG:{}: {:?}", self.epsg(), e)))?;
        Ok(UtmProjection { zone: *self, source, target })
    }
}

/// WGS84 geographic to UTM transform for one zone.
pub struct UtmProjection {
    zone: UtmZone,
    source: Proj,
    target: Proj,
}

impl UtmProjection {
    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    /// Projects a `(lon, lat)` coordinate in degrees to `(easting, northing)` in meters.
    pub fn project(&self, c: Coord<f64>) -> Result<Coord<f64>> {
        // proj4rs takes geographic input in radians.
        let mut point = (c.x.to_radians(), c.y.to_radians(), 0.0);
        transform(&self.source, &self.target, &mut point).map_err(|e| {
            Error::Projection(format!("({}, {}) to EPSG:{}: {:?}", c.x, c.y, self.zone.epsg(), e))
        })?;
        Ok(Coord { x: point.0, y: point.1 })
    }
}
