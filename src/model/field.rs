//! Generated form-field and section types.

use serde::{Deserialize, Serialize};

/// Input type of a generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text
    #[default]
    Text,
    /// Multi-line text
    Textarea,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Signature capture
    Signature,
    /// File upload
    File,
    /// Checkbox
    Checkbox,
    /// Radio group
    Radio,
    /// Choice list
    Select,
}

/// A single validation rule attached to a generated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rule kind (e.g. "email", "pattern", "custom")
    #[serde(rename = "type")]
    pub rule_type: String,

    /// Rule parameter (pattern source, limit, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Message shown when the rule fails
    pub message: String,
}

impl ValidationRule {
    /// Create a rule without a parameter.
    pub fn new(rule_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule_type: rule_type.into(),
            value: None,
            message: message.into(),
        }
    }

    /// Create a rule with a parameter.
    pub fn with_value(
        rule_type: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_type: rule_type.into(),
            value: Some(value.into()),
            message: message.into(),
        }
    }
}

/// A structured form-field definition offered for human review.
///
/// Mutable by the reviewer after synthesis; regenerated wholesale (not
/// incrementally patched) whenever an underlying element's type changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedField {
    /// Process-unique field id
    pub id: String,

    /// Sanitized snake_case machine name
    pub name: String,

    /// Display label (possibly translated)
    pub label: String,

    /// Input type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field must be filled
    pub required: bool,

    /// Placeholder text
    pub placeholder: String,

    /// Reviewer-facing hint, when one applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Synthesis order (grouped fields first, then ungrouped)
    pub order: usize,

    /// Validation rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_rules: Vec<ValidationRule>,

    /// Whether the field holds protected health information
    pub is_phi_field: bool,

    /// Whether edits to the field must be audited
    pub audit_required: bool,

    /// Choice options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Pre-filled value extracted from the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Page the field originated from (1-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,

    /// Id of the form element this field was synthesized from.
    /// Stable identity used for section assignment.
    pub source_element_id: String,
}

impl GeneratedField {
    /// Check if any rule of the given type is attached.
    pub fn has_rule(&self, rule_type: &str) -> bool {
        self.validation_rules.iter().any(|r| r.rule_type == rule_type)
    }
}

/// A derived grouping of fields for display purposes.
///
/// Never the authoritative field container: a field's home section is
/// reconstructed from element geometry at synthesis time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section id
    pub id: String,

    /// Display name
    pub name: String,

    /// Ordered member field ids
    pub field_ids: Vec<String>,

    /// Whether the section can be collapsed in review
    pub collapsible: bool,

    /// Whether the section starts expanded
    pub default_expanded: bool,
}

impl Section {
    /// Create a new, empty section.
    pub fn new(index: usize) -> Self {
        Self {
            id: format!("section-{}", index + 1),
            name: format!("Section {}", index + 1),
            field_ids: Vec::new(),
            collapsible: true,
            default_expanded: index == 0,
        }
    }
}
