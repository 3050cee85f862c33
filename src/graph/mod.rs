//! Block-graph traversal and extraction passes.
//!
//! Three independent passes over an indexed graph each emit one
//! category of structured data: label/value pairs, grid tables, and
//! selection marks. All of them are pure functions over an already
//! fetched block list; none perform I/O.

mod keyvalue;
mod resolver;
mod selection;
mod table;

pub use keyvalue::{extract_key_values, KeyValuePair};
pub use resolver::BlockIndex;
pub use selection::{extract_selection_marks, SelectionMark, CHECKED_GLYPH, UNCHECKED_GLYPH};
pub use table::{reconstruct_tables, DEFAULT_CELL_CONFIDENCE};
