//! Data model for block-graph analysis.
//!
//! Two layers live here: the external [`Block`] graph exactly as the
//! document-analysis provider serializes it, and the normalized types
//! this crate synthesizes from it ([`FormElement`], [`Table`],
//! [`GeneratedField`], [`Section`]).

mod block;
mod element;
mod field;
mod table;

pub use block::{
    Block, BlockKind, EntityType, Geometry, Relationship, RelationshipKind, SelectionStatus,
    WireBoundingBox,
};
pub use element::{BoundingBox, ElementType, FormElement};
pub use field::{FieldType, GeneratedField, Section, ValidationRule};
pub use table::{Table, TableCell};
