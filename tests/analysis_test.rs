//! End-to-end tests: block-graph JSON in, elements/fields/sections out.

use formsense::{
    parse_blocks_json, ElementType, FieldType, Formsense, GroupingConfig, JsonFormat,
};

/// A single-page intake form: two key/value rows, one checkbox, one
/// table, and a free-text footer.
fn intake_form_json() -> String {
    r#"{
        "Blocks": [
            {
                "Id": "k-name", "BlockType": "KEY_VALUE_SET", "Confidence": 97.0,
                "EntityTypes": ["KEY"],
                "Geometry": { "BoundingBox": { "Left": 0.10, "Top": 0.10, "Width": 0.10, "Height": 0.02 } },
                "Relationships": [
                    { "Type": "CHILD", "Ids": ["w-name-1", "w-name-2"] },
                    { "Type": "VALUE", "Ids": ["v-name"] }
                ]
            },
            {
                "Id": "v-name", "BlockType": "KEY_VALUE_SET", "Confidence": 95.0,
                "EntityTypes": ["VALUE"],
                "Geometry": { "BoundingBox": { "Left": 0.13, "Top": 0.10, "Width": 0.12, "Height": 0.02 } },
                "Relationships": [ { "Type": "CHILD", "Ids": ["w-jane"] } ]
            },
            { "Id": "w-name-1", "BlockType": "WORD", "Text": "Patient", "Confidence": 97.0 },
            { "Id": "w-name-2", "BlockType": "WORD", "Text": "Name:", "Confidence": 97.0 },
            { "Id": "w-jane", "BlockType": "WORD", "Text": "Jane Doe", "Confidence": 95.0 },

            {
                "Id": "k-dob", "BlockType": "KEY_VALUE_SET", "Confidence": 74.0,
                "EntityTypes": ["KEY"],
                "Geometry": { "BoundingBox": { "Left": 0.10, "Top": 0.15, "Width": 0.08, "Height": 0.02 } },
                "Relationships": [
                    { "Type": "CHILD", "Ids": ["w-dob"] },
                    { "Type": "VALUE", "Ids": ["v-dob"] }
                ]
            },
            {
                "Id": "v-dob", "BlockType": "KEY_VALUE_SET", "Confidence": 70.0,
                "EntityTypes": ["VALUE"],
                "Geometry": { "BoundingBox": { "Left": 0.13, "Top": 0.15, "Width": 0.10, "Height": 0.02 } },
                "Relationships": [ { "Type": "CHILD", "Ids": ["w-dob-v"] } ]
            },
            { "Id": "w-dob", "BlockType": "WORD", "Text": "DOB:", "Confidence": 74.0 },
            { "Id": "w-dob-v", "BlockType": "WORD", "Text": "01/02/1980", "Confidence": 70.0 },

            {
                "Id": "s-consent", "BlockType": "SELECTION_ELEMENT", "Confidence": 92.0,
                "SelectionStatus": "SELECTED",
                "Geometry": { "BoundingBox": { "Left": 0.10, "Top": 0.40, "Width": 0.02, "Height": 0.02 } }
            },

            {
                "Id": "t-meds", "BlockType": "TABLE", "Confidence": 90.0,
                "Geometry": { "BoundingBox": { "Left": 0.10, "Top": 0.55, "Width": 0.60, "Height": 0.20 } },
                "Relationships": [ { "Type": "CHILD", "Ids": ["c-11", "c-22"] } ]
            },
            { "Id": "c-11", "BlockType": "CELL", "Text": "Medication", "Confidence": 90.0,
              "RowIndex": 1, "ColumnIndex": 1 },
            { "Id": "c-22", "BlockType": "CELL", "Text": "Daily", "Confidence": 90.0,
              "RowIndex": 2, "ColumnIndex": 2 },

            { "Id": "l-footer", "BlockType": "LINE", "Text": "Please print clearly.", "Confidence": 99.0,
              "Geometry": { "BoundingBox": { "Left": 0.10, "Top": 0.90, "Width": 0.30, "Height": 0.02 } } }
        ]
    }"#
    .to_string()
}

fn analyze() -> formsense::FormsenseAnalysis {
    Formsense::new()
        .with_reference_page(1000.0, 1000.0)
        .analyze_json(&intake_form_json())
        .unwrap()
}

#[test]
fn test_element_inventory_and_order() {
    let analysis = analyze();
    let types: Vec<ElementType> = analysis
        .elements()
        .iter()
        .map(|e| e.element_type)
        .collect();
    assert_eq!(
        types,
        vec![
            ElementType::Label,
            ElementType::Input,
            ElementType::Label,
            ElementType::Input,
            ElementType::Checkbox,
            ElementType::Table,
            ElementType::Text,
        ]
    );
    assert_eq!(analysis.elements()[0].text, "Patient Name:");
    assert_eq!(analysis.elements()[1].value.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_table_reconstruction() {
    let analysis = analyze();
    assert_eq!(analysis.tables().len(), 1);
    let table = &analysis.tables()[0];
    assert_eq!((table.rows, table.columns), (2, 2));
    assert_eq!(table.cell(0, 0).unwrap().text, "Medication");
    assert_eq!(table.cell(1, 1).unwrap().text, "Daily");
    assert!(table.cell(0, 1).is_none());
    assert!(table.cell(1, 0).is_none());
}

#[test]
fn test_phi_and_low_confidence_fields() {
    let analysis = analyze();

    let name_field = analysis
        .fields()
        .iter()
        .find(|f| f.name == "patient_name")
        .expect("patient name field");
    assert!(name_field.is_phi_field);
    assert!(name_field.audit_required);
    assert_eq!(name_field.default_value.as_deref(), Some("Jane Doe"));
    assert!(!name_field.has_rule("custom"));

    let dob_field = analysis
        .fields()
        .iter()
        .find(|f| f.name == "dob")
        .expect("dob field");
    assert_eq!(dob_field.field_type, FieldType::Date);
    assert!(dob_field.is_phi_field);
    // min(74, 74) -> rounded 74%
    let custom = dob_field
        .validation_rules
        .iter()
        .find(|r| r.rule_type == "custom")
        .expect("low-confidence rule");
    assert!(custom.message.contains("74%"));
}

#[test]
fn test_checkbox_field_carries_state() {
    let analysis = analyze();
    let checkbox = analysis
        .fields()
        .iter()
        .find(|f| f.field_type == FieldType::Checkbox)
        .expect("checkbox field");
    assert_eq!(checkbox.default_value.as_deref(), Some("checked"));
}

#[test]
fn test_sections_split_by_vertical_gap() {
    let analysis = analyze();
    // Rows at 100/150px, then 400, 550, 900px with a 100px gap
    // threshold: four sections
    assert_eq!(analysis.sections().len(), 4);
    let assigned: usize = analysis
        .sections()
        .iter()
        .map(|s| s.field_ids.len())
        .sum();
    assert_eq!(assigned, analysis.fields().len());
}

#[test]
fn test_json_output_shape() {
    let analysis = analyze();
    let json = analysis.to_json(JsonFormat::Pretty).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed["elements"].is_array());
    assert!(parsed["tables"].is_array());
    assert!(parsed["fields"].is_array());
    assert!(parsed["sections"].is_array());
    assert!(parsed["average_confidence"].is_number());
}

#[test]
fn test_provider_field_names_round_trip() {
    let blocks = parse_blocks_json(&intake_form_json()).unwrap();
    let json = serde_json::to_string(&blocks[0]).unwrap();
    // Wire names are preserved bit-exact on the way back out
    assert!(json.contains("\"BlockType\":\"KEY_VALUE_SET\""));
    assert!(json.contains("\"EntityTypes\":[\"KEY\"]"));
    assert!(json.contains("\"BoundingBox\""));
    assert!(json.contains("\"Left\":"));
    let reparsed = parse_blocks_json(&format!("[{}]", json)).unwrap();
    assert_eq!(reparsed[0].id, blocks[0].id);
}

#[test]
fn test_legacy_units_collapse_without_reference_page() {
    // Provider-faithful default: thresholds compared directly against
    // normalized coordinates, one row group per page, so the footer
    // line pairs into the same cluster as everything else and a single
    // section is emitted.
    let analysis = Formsense::new()
        .with_grouping(GroupingConfig::default())
        .analyze_json(&intake_form_json())
        .unwrap();
    assert_eq!(analysis.sections().len(), 1);
}
