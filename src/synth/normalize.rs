//! Element normalization.
//!
//! Merges the three extraction passes plus residual plain-text lines
//! into one ordered list of form elements per page.

use crate::graph::{
    extract_key_values, extract_selection_marks, reconstruct_tables, BlockIndex,
};
use crate::model::{Block, BlockKind, ElementType, FormElement, Table};

/// One page's normalized output.
#[derive(Debug, Clone)]
pub struct PageElements {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Elements in emission order: key/value pairs, then selection
    /// marks, then table summaries, then residual text lines
    pub elements: Vec<FormElement>,

    /// Tables reconstructed on this page
    pub tables: Vec<Table>,

    /// Average confidence across emitted elements (0 when none)
    pub average_confidence: f32,
}

impl PageElements {
    /// An explicit empty entry for a page that yielded nothing.
    pub fn empty(page_number: u32) -> Self {
        Self {
            page_number,
            elements: Vec::new(),
            tables: Vec::new(),
            average_confidence: 0.0,
        }
    }
}

/// Normalize one page's block graph into ordered form elements.
///
/// Emission order fixes element ids: one label per key/value pair
/// (plus a paired input when the value is non-empty), then one element
/// per selection mark, then one table summary per reconstructed table,
/// then every LINE block not already captured as a child of a
/// KEY_VALUE_SET block, as free text.
pub fn normalize_page(blocks: &[Block], page_number: u32) -> PageElements {
    let index = BlockIndex::new(blocks);
    let mut elements: Vec<FormElement> = Vec::new();
    let mut seq = 0usize;
    let next_id = |seq: &mut usize| {
        *seq += 1;
        format!("element-{}-{}", page_number, *seq)
    };

    // Key/value pairs: a label, plus an input when a value was read
    for pair in extract_key_values(&index) {
        let label_id = next_id(&mut seq);
        let mut label = FormElement::new(
            &label_id,
            ElementType::Label,
            &pair.key,
            pair.confidence,
            pair.key_bounding_box,
            page_number,
        );

        if pair.value.is_empty() {
            elements.push(label);
            continue;
        }

        let input_id = next_id(&mut seq);
        let mut input = FormElement::new(
            &input_id,
            ElementType::Input,
            &pair.value,
            pair.confidence,
            pair.value_bounding_box.unwrap_or(pair.key_bounding_box),
            page_number,
        )
        .with_value(&pair.value);

        label.relate(&input_id);
        input.relate(&label_id);
        elements.push(label);
        elements.push(input);
    }

    // Selection marks
    for mark in extract_selection_marks(&index) {
        elements.push(
            FormElement::new(
                next_id(&mut seq),
                ElementType::Checkbox,
                mark.text,
                mark.confidence,
                mark.bounding_box,
                page_number,
            )
            .with_value(mark.value),
        );
    }

    // Table summaries
    let tables = reconstruct_tables(&index);
    for table in &tables {
        elements.push(FormElement::new(
            next_id(&mut seq),
            ElementType::Table,
            format!("Table ({} x {})", table.rows, table.columns),
            table.confidence,
            table.bounding_box,
            page_number,
        ));
    }

    // Residual text lines not already captured by the key/value pass
    let captured = index.key_value_child_ids();
    for line in index.blocks_of(BlockKind::Line) {
        if captured.contains(line.id.as_str()) {
            continue;
        }
        let text = index.resolve_text(line);
        if text.is_empty() {
            continue;
        }
        elements.push(FormElement::new(
            next_id(&mut seq),
            ElementType::Text,
            text,
            line.confidence_or(0.0),
            line.bounding_box(),
            page_number,
        ));
    }

    let average_confidence = if elements.is_empty() {
        0.0
    } else {
        elements.iter().map(|e| e.confidence).sum::<f32>() / elements.len() as f32
    };

    log::debug!(
        "Page {}: {} elements, {} tables, avg confidence {:.1}",
        page_number,
        elements.len(),
        tables.len(),
        average_confidence
    );

    PageElements {
        page_number,
        elements,
        tables,
        average_confidence,
    }
}
