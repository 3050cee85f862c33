//! Field synthesis: pairings and standalone elements become structured
//! form-field definitions, plus geometry-derived sections.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use super::grouping::{pair_rows, Pairing, RowClustering};
use crate::config::{GroupingConfig, SynthesisConfig};
use crate::model::{
    ElementType, FieldType, FormElement, GeneratedField, Section, ValidationRule,
};

/// One page's synthesized fields and sections.
#[derive(Debug, Clone)]
pub struct PageSynthesis {
    /// Generated fields in synthesis order
    pub fields: Vec<GeneratedField>,

    /// Sections derived from vertical gaps between elements
    pub sections: Vec<Section>,
}

/// Synthesize fields and sections for one page's elements.
///
/// Re-running on an unchanged element list produces fields equal up to
/// id numbering. Must be re-invoked whenever a reviewer edits an
/// element's type or value.
pub fn synthesize_page(
    elements: &[FormElement],
    clusterer: &dyn RowClustering,
    grouping: &GroupingConfig,
    config: &SynthesisConfig,
) -> PageSynthesis {
    let groups = clusterer.cluster(elements, grouping);
    let pairings = pair_rows(&groups, grouping);

    let fields: Vec<GeneratedField> = pairings
        .iter()
        .enumerate()
        .map(|(order, pairing)| synthesize_field(pairing, order, config))
        .collect();

    let sections = derive_sections(elements, &fields, grouping);

    PageSynthesis { fields, sections }
}

/// Derive one field from a pairing or standalone element.
fn synthesize_field(
    pairing: &Pairing<'_>,
    order: usize,
    config: &SynthesisConfig,
) -> GeneratedField {
    let anchor = pairing.anchor();
    let min_confidence = pairing.min_confidence();

    let name = sanitize_name(&anchor.text);
    let label = display_label(&anchor.text, config);
    let field_type = infer_field_type(anchor);

    let default_value = match pairing {
        Pairing::LabeledInput { input, .. } => {
            Some(input.value.clone().unwrap_or_else(|| input.text.clone()))
        }
        Pairing::Standalone(element) => element.value.clone(),
    };

    let mut validation_rules = base_validation_rules(field_type, &label);
    let low_confidence = min_confidence < config.low_confidence_threshold;
    if low_confidence {
        validation_rules.push(ValidationRule::new(
            "custom",
            format!(
                "Low OCR confidence ({}%) - verify before use",
                min_confidence.round() as i64
            ),
        ));
    }

    let help_text = if low_confidence {
        Some(format!(
            "Review recommended: recognized with {}% confidence",
            min_confidence.round() as i64
        ))
    } else {
        type_help_text(field_type, &validation_rules)
    };

    let lower_text = anchor.text.to_lowercase();
    let phi_basis = format!("{} {}", label, name);

    GeneratedField {
        id: format!("field-{}-{}", anchor.page_number, order + 1),
        required: anchor.text.contains('*') || lower_text.contains("required"),
        placeholder: placeholder_for(field_type, &label),
        is_phi_field: config.phi_keywords.matches(&phi_basis),
        audit_required: config.phi_keywords.matches(&phi_basis),
        options: anchor.options.clone().unwrap_or_default(),
        page_number: Some(anchor.page_number),
        source_element_id: anchor.id.clone(),
        name,
        label,
        field_type,
        help_text,
        order,
        validation_rules,
        default_value,
    }
}

/// Lowercase, collapse non-alphanumeric runs to a single `_`, and trim
/// leading/trailing `_`.
pub fn sanitize_name(text: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static pattern"));
    re.replace_all(&text.to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}

/// Resolve the display label, translating when the active display
/// language differs from the source language. All-caps source text
/// yields an all-caps translation.
fn display_label(text: &str, config: &SynthesisConfig) -> String {
    let trimmed = text.trim();
    if !config.translation_active() {
        return trimmed.to_string();
    }

    match config.translations.lookup(trimmed) {
        Some(translation) => {
            let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
            let all_caps = !letters.is_empty() && letters.iter().all(|c| c.is_uppercase());
            if all_caps {
                translation.to_uppercase()
            } else {
                translation.to_string()
            }
        }
        None => trimmed.to_string(),
    }
}

/// Derive the field's input type: pass-through for mark/choice
/// elements, otherwise an ordered substring match on the lowercase text.
fn infer_field_type(element: &FormElement) -> FieldType {
    match element.element_type {
        ElementType::Checkbox => return FieldType::Checkbox,
        ElementType::Radio => return FieldType::Radio,
        ElementType::Select => return FieldType::Select,
        _ => {}
    }

    let text = element.text.to_lowercase();
    const RULES: &[(&[&str], FieldType)] = &[
        (&["email"], FieldType::Email),
        (&["phone", "tel"], FieldType::Phone),
        (&["date", "dob"], FieldType::Date),
        (&["time"], FieldType::Time),
        (&["signature"], FieldType::Signature),
        (&["file", "upload"], FieldType::File),
        (&["notes", "comments", "description"], FieldType::Textarea),
    ];
    for (needles, field_type) in RULES {
        if needles.iter().any(|n| text.contains(n)) {
            return *field_type;
        }
    }
    FieldType::Text
}

/// Type-intrinsic validation rules.
fn base_validation_rules(field_type: FieldType, label: &str) -> Vec<ValidationRule> {
    match field_type {
        FieldType::Email => vec![ValidationRule::new(
            "email",
            format!("{} must be a valid email address", label),
        )],
        FieldType::Phone => vec![ValidationRule::with_value(
            "pattern",
            r"^\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$",
            format!("{} must be a valid phone number", label),
        )],
        _ => Vec::new(),
    }
}

/// Placeholder text for the field type.
fn placeholder_for(field_type: FieldType, label: &str) -> String {
    match field_type {
        FieldType::Email => "example@email.com".to_string(),
        FieldType::Phone => "(555) 555-5555".to_string(),
        FieldType::Date => "MM/DD/YYYY".to_string(),
        FieldType::Time => "HH:MM".to_string(),
        _ => format!("Enter {}", label),
    }
}

/// Hint text for types that benefit from one.
fn type_help_text(field_type: FieldType, rules: &[ValidationRule]) -> Option<String> {
    match field_type {
        FieldType::Date => Some("Use MM/DD/YYYY format".to_string()),
        FieldType::File => Some("Accepted formats: PDF, JPG, PNG".to_string()),
        _ if rules.iter().any(|r| r.rule_type == "pattern") => {
            Some("Must match the expected format".to_string())
        }
        _ => None,
    }
}

/// Split the original element list into sections by vertical gap and
/// attach fields through their stable `source_element_id`.
///
/// A new section opens whenever the gap between the current and
/// previous element's `top` exceeds the section-gap threshold. Fields
/// whose source element falls in a section are listed in field order.
fn derive_sections(
    elements: &[FormElement],
    fields: &[GeneratedField],
    grouping: &GroupingConfig,
) -> Vec<Section> {
    if elements.is_empty() {
        return Vec::new();
    }

    let (_, scale_y) = grouping.working_scale();
    let mut element_section: HashMap<&str, usize> = HashMap::new();
    let mut section_count = 0usize;
    let mut prev_top = f32::NAN;

    for element in elements {
        let top = element.bounding_box.top * scale_y;
        if section_count == 0 || (top - prev_top) > grouping.section_gap {
            section_count += 1;
        }
        element_section.insert(element.id.as_str(), section_count - 1);
        prev_top = top;
    }

    let mut sections: Vec<Section> = (0..section_count).map(Section::new).collect();
    for field in fields {
        if let Some(&idx) = element_section.get(field.source_element_id.as_str()) {
            sections[idx].field_ids.push(field.id.clone());
        }
    }

    sections
}
