use geo::{Area, Centroid, Coord, LineString, Polygon};

use super::UtmZone;
use crate::error::{Error, Result};

pub const SQM_PER_HECTARE: f64 = 10_000.0;

/// Ground area in square meters of the polygon outlined by `ring` (`lon, lat` degrees).
///
/// The ring is projected into the UTM zone of its centroid before measuring.
/// Fewer than 3 points have no area.
pub fn calculate_area(ring: &[Coord<f64>]) -> Result<f64> {
    if ring.len() < 3 {
        return Ok(0.0);
    }
    if let Some(bad) = ring.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(Error::Geometry(format!("non-finite coordinate ({}, {})", bad.x, bad.y)));
    }

    let polygon = Polygon::new(LineString::from(ring.to_vec()), vec![]);
    let centroid = polygon
        .centroid()
        .ok_or_else(|| Error::Geometry("polygon has no centroid".into()))?;
    let zone = UtmZone::for_lon_lat(centroid.x(), centroid.y());

    let projection = zone.projection()?;
    let projected = polygon
        .exterior()
        .coords()
        .map(|c| projection.project(*c))
        .collect::<Result<Vec<_>>>()?;
    let projected = Polygon::new(LineString::from(projected), vec![]);
    let area = projected.unsigned_area();
    if !area.is_finite() {
        return Err(Error::Geometry(format!("area in UTM zone {} is not finite", zone.epsg())));
    }
    Ok(area)
}

/// Rounds to 2 decimal places, the precision areas are reported with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Meters per degree on WGS84 at the equator.
    const M_PER_DEG_LON_EQUATOR: f64 = 111_319.49;
    const M_PER_DEG_LAT_EQUATOR: f64 = 110_574.27;

    fn square(lon: f64, lat: f64, dlon: f64, dlat: f64) -> Vec<Coord<f64>> {
        vec![
            Coord { x: lon, y: lat },
            Coord { x: lon + dlon, y: lat },
            Coord { x: lon + dlon, y: lat + dlat },
            Coord { x: lon, y: lat + dlat },
        ]
    }

    #[test]
    fn degenerate_rings_have_no_area() {
        assert_eq!(calculate_area(&[]).unwrap(), 0.0);
        assert_eq!(calculate_area(&[Coord { x: 4.0, y: 52.0 }]).unwrap(), 0.0);
        assert_eq!(
            calculate_area(&[Coord { x: 4.0, y: 52.0 }, Coord { x: 4.1, y: 52.1 }]).unwrap(),
            0.0
        );
    }

    #[test]
    fn square_kilometer_at_the_equator() {
        let ring = square(3.0, 0.0, 1000.0 / M_PER_DEG_LON_EQUATOR, 1000.0 / M_PER_DEG_LAT_EQUATOR);
        let area = calculate_area(&ring).unwrap();
        // Scaled by k0² on the central meridian.
        assert_relative_eq!(area, 1_000_000.0, max_relative = 0.002);
    }

    #[test]
    fn closed_and_open_rings_agree() {
        let open = square(4.0, 52.0, 0.01, 0.01);
        let mut closed = open.clone();
        closed.push(open[0]);
        assert_relative_eq!(
            calculate_area(&open).unwrap(),
            calculate_area(&closed).unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn winding_does_not_matter() {
        let ring = square(-70.0, -33.0, 0.02, 0.02);
        let reversed: Vec<_> = ring.iter().rev().copied().collect();
        let area = calculate_area(&ring).unwrap();
        assert!(area > 0.0);
        assert_relative_eq!(area, calculate_area(&reversed).unwrap(), max_relative = 1e-12);
    }

    #[test]
    fn non_finite_coordinates_fail() {
        let mut ring = square(4.0, 52.0, 0.01, 0.01);
        ring[1].x = f64::NAN;
        assert!(matches!(calculate_area(&ring), Err(Error::Geometry(_))));
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(8012.3456), 8012.35);
        assert_eq!(round2(0.801), 0.8);
    }
}
