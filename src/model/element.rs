//! Synthesized form-element types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A normalized bounding box relative to page dimensions.
///
/// All fields are in [0, 1] until explicitly converted to pixel space
/// by the view transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Check if a point lies inside the box (inclusive edges).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Euclidean distance between the top-left corners of two boxes,
    /// with each axis scaled by the given factors.
    pub fn top_left_distance(&self, other: &BoundingBox, scale_x: f32, scale_y: f32) -> f32 {
        let dx = (self.left - other.left) * scale_x;
        let dy = (self.top - other.top) * scale_y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Kind of a synthesized form element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// A field label (the key side of a key/value pairing)
    Label,
    /// A fillable input (the value side of a key/value pairing)
    Input,
    /// A checkbox or radio mark
    Checkbox,
    /// A radio mark, when a reviewer reclassifies a checkbox
    Radio,
    /// A choice field
    Select,
    /// A table summary entry
    Table,
    /// Free text not captured by any other pass
    Text,
}

impl ElementType {
    /// Check if this element acts as a label in spatial pairing.
    pub fn is_label(&self) -> bool {
        matches!(self, ElementType::Label)
    }
}

/// A synthesized, page-scoped unit of form structure.
///
/// Immutable once created except for `element_type` and `value`, which
/// a reviewer may edit; any such edit invalidates previously synthesized
/// fields and must re-trigger the field synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormElement {
    /// Process-unique element id
    pub id: String,

    /// Element kind
    #[serde(rename = "type")]
    pub element_type: ElementType,

    /// Display text
    pub text: String,

    /// Recognition confidence in [0, 100]
    pub confidence: f32,

    /// Normalized bounding box
    pub bounding_box: BoundingBox,

    /// Ids of spatially or semantically related elements
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub related_element_ids: BTreeSet<String>,

    /// Extracted value, when the element carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Choice options, for select-like elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Page this element belongs to (1-indexed)
    pub page_number: u32,
}

impl FormElement {
    /// Create a new element with the given id, kind, and text.
    pub fn new(
        id: impl Into<String>,
        element_type: ElementType,
        text: impl Into<String>,
        confidence: f32,
        bounding_box: BoundingBox,
        page_number: u32,
    ) -> Self {
        Self {
            id: id.into(),
            element_type,
            text: text.into(),
            confidence,
            bounding_box,
            related_element_ids: BTreeSet::new(),
            value: None,
            options: None,
            page_number,
        }
    }

    /// Set the value and return self.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the options and return self.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    /// Link another element as related.
    pub fn relate(&mut self, id: impl Into<String>) {
        self.related_element_ids.insert(id.into());
    }

    /// Check if this element acts as a label in spatial pairing.
    pub fn is_label(&self) -> bool {
        self.element_type.is_label()
    }
}
