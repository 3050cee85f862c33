//! External block-graph types.
//!
//! These types mirror the document-analysis provider's wire schema
//! exactly (field names are case-sensitive and PascalCase on the wire).
//! The graph is read-only input: nothing in this crate mutates a
//! [`Block`], and nothing assumes the graph is internally consistent —
//! relationship ids may point at blocks that do not exist.

use super::BoundingBox;
use serde::{Deserialize, Serialize};

/// One node of the provider's document-analysis graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Provider-assigned block id
    pub id: String,

    /// Kind of block
    pub block_type: BlockKind,

    /// Recognized text, when the block carries its own text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Recognition confidence in [0, 100]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Block geometry (normalized bounding box)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    /// KEY/VALUE roles for KEY_VALUE_SET blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_types: Option<Vec<EntityType>>,

    /// Links to other blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,

    /// Mark state for SELECTION_ELEMENT blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<SelectionStatus>,

    /// 1-based row index (CELL blocks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column index (CELL blocks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Row span (CELL blocks only, defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    /// Column span (CELL blocks only, defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
}

impl Block {
    /// Get the block's confidence, or a fallback when absent.
    pub fn confidence_or(&self, default: f32) -> f32 {
        self.confidence.unwrap_or(default)
    }

    /// Get the block's normalized bounding box, or a zero box when absent.
    pub fn bounding_box(&self) -> BoundingBox {
        self.geometry
            .as_ref()
            .map(|g| g.bounding_box.normalized())
            .unwrap_or_default()
    }

    /// Check if the block carries the given entity type.
    pub fn has_entity_type(&self, entity: EntityType) -> bool {
        self.entity_types
            .as_ref()
            .is_some_and(|types| types.contains(&entity))
    }

    /// Ids referenced through a relationship of the given kind.
    ///
    /// Returns an empty slice when the block has no such relationship.
    pub fn related_ids(&self, kind: RelationshipKind) -> &[String] {
        self.relationships
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|r| r.relationship_type == kind)
            .map(|r| r.ids.as_slice())
            .unwrap_or_default()
    }
}

/// Block kind on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockKind {
    /// A line of text
    Line,
    /// A single word
    Word,
    /// One half of a key/value pairing (role given by `EntityTypes`)
    KeyValueSet,
    /// A checkbox or radio mark
    SelectionElement,
    /// A table region
    Table,
    /// A table cell
    Cell,
    /// Any block kind this crate does not consume (e.g. PAGE).
    /// Provider schemas drift; unknown kinds must not fail decoding.
    #[serde(other)]
    Unknown,
}

/// KEY/VALUE role of a KEY_VALUE_SET block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// The label side of a pairing
    Key,
    /// The answer side of a pairing
    Value,
}

/// A typed link from one block to a list of other blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship kind
    #[serde(rename = "Type")]
    pub relationship_type: RelationshipKind,

    /// Referenced block ids (not guaranteed to exist in the graph)
    #[serde(rename = "Ids")]
    pub ids: Vec<String>,
}

/// Relationship kind on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    /// Containment (words of a line, cells of a table, ...)
    Child,
    /// KEY block to its paired VALUE block
    Value,
    /// Any relationship kind this crate does not follow
    #[serde(other)]
    Unknown,
}

/// Mark state of a SELECTION_ELEMENT block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    /// The mark is filled in
    Selected,
    /// The mark is empty
    NotSelected,
}

/// Block geometry on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    /// Normalized bounding box
    pub bounding_box: WireBoundingBox,
}

/// Bounding box as serialized by the provider (PascalCase field names,
/// normalized to [0, 1] of the page dimensions).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireBoundingBox {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl WireBoundingBox {
    /// Convert to the crate's normalized bounding box type.
    pub fn normalized(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width, self.height)
    }
}
