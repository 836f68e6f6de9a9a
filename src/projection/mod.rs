mod area;
mod utm;

pub use area::*;
pub use utm::*;
