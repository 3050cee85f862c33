//! Synthesis passes: normalization, spatial grouping, field generation.
//!
//! All pure synchronous functions over already-extracted data; fully
//! deterministic given identical input ordering.

mod fields;
mod grouping;
mod normalize;

pub use fields::{sanitize_name, synthesize_page, PageSynthesis};
pub use grouping::{pair_rows, GreedyRowClusterer, Pairing, RowClustering};
pub use normalize::{normalize_page, PageElements};
