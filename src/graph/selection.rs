//! Selection mark (checkbox/radio) extraction.

use super::BlockIndex;
use crate::model::{BlockKind, BoundingBox, SelectionStatus};

/// Glyph rendered for a filled mark.
pub const CHECKED_GLYPH: &str = "☑";
/// Glyph rendered for an empty mark.
pub const UNCHECKED_GLYPH: &str = "☐";

/// One extracted selection mark.
///
/// Checkbox and radio semantics are not distinguished at this stage;
/// downstream consumers may reclassify using surrounding context.
#[derive(Debug, Clone)]
pub struct SelectionMark {
    /// Source block id
    pub id: String,

    /// Whether the mark is filled in
    pub checked: bool,

    /// Display glyph
    pub text: &'static str,

    /// Value string ("checked" / "unchecked")
    pub value: &'static str,

    /// Recognition confidence
    pub confidence: f32,

    /// Normalized bounding box
    pub bounding_box: BoundingBox,
}

/// Extract all selection marks from the block graph.
///
/// SELECTED maps to a checked mark; anything else (NOT_SELECTED or a
/// missing status) maps to unchecked.
pub fn extract_selection_marks(index: &BlockIndex<'_>) -> Vec<SelectionMark> {
    index
        .blocks_of(BlockKind::SelectionElement)
        .map(|block| {
            let checked = block.selection_status == Some(SelectionStatus::Selected);
            SelectionMark {
                id: block.id.clone(),
                checked,
                text: if checked { CHECKED_GLYPH } else { UNCHECKED_GLYPH },
                value: if checked { "checked" } else { "unchecked" },
                confidence: block.confidence_or(0.0),
                bounding_box: block.bounding_box(),
            }
        })
        .collect()
}
