mod josm;
mod nominatim;

pub use josm::*;
pub use nominatim::*;
