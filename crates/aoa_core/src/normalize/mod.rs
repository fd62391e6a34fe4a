pub mod citations;
pub mod coerce;
pub mod flatten;

pub use citations::cited_indexes;
pub use flatten::flatten_blocks;
