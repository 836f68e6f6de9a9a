mod export;
mod feature;
mod rings;

pub use export::*;
pub use feature::*;
pub use rings::*;
