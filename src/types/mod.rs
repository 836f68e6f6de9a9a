mod bbox;
mod overpass_types;

pub use bbox::*;
pub use overpass_types::*;

/// A ring of `(lon, lat)` coordinates, closed once its last point equals its first.
pub type Ring = Vec<geo::Coord<f64>>;
