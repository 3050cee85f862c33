//! Multi-page pipeline tests: per-page block graphs through the
//! provider boundary, aggregation, and the review session.

use formsense::{
    hit_test, parse_blocks_json, AnalyzeOptions, DocumentPipeline, PageInput, ReviewSession,
    StaticProvider, ViewTransform,
};

fn page_graph(label: &str, value: &str) -> Vec<formsense::Block> {
    let json = format!(
        r#"[
            {{
                "Id": "key", "BlockType": "KEY_VALUE_SET", "Confidence": 96.0,
                "EntityTypes": ["KEY"],
                "Geometry": {{ "BoundingBox": {{ "Left": 0.10, "Top": 0.20, "Width": 0.10, "Height": 0.02 }} }},
                "Relationships": [
                    {{ "Type": "CHILD", "Ids": ["kw"] }},
                    {{ "Type": "VALUE", "Ids": ["val"] }}
                ]
            }},
            {{
                "Id": "val", "BlockType": "KEY_VALUE_SET", "Confidence": 94.0,
                "EntityTypes": ["VALUE"],
                "Geometry": {{ "BoundingBox": {{ "Left": 0.25, "Top": 0.20, "Width": 0.15, "Height": 0.02 }} }},
                "Relationships": [ {{ "Type": "CHILD", "Ids": ["vw"] }} ]
            }},
            {{ "Id": "kw", "BlockType": "WORD", "Text": "{label}", "Confidence": 96.0 }},
            {{ "Id": "vw", "BlockType": "WORD", "Text": "{value}", "Confidence": 94.0 }}
        ]"#
    );
    parse_blocks_json(&json).unwrap()
}

fn inputs(count: u32) -> Vec<PageInput> {
    (1..=count).map(|n| PageInput::new(n, Vec::new())).collect()
}

#[test]
fn test_multi_page_aggregation() {
    let provider = StaticProvider::new(
        "export",
        vec![
            page_graph("Name:", "Jane Doe"),
            page_graph("Email:", "jane@example.com"),
        ],
    );
    let pipeline = DocumentPipeline::new(provider, AnalyzeOptions::default());
    let result = pipeline.process(&inputs(2));

    assert_eq!(result.metadata.page_count, 2);
    assert!(result.failed_pages().is_empty());
    // Label plus input per page
    assert_eq!(result.elements.len(), 4);
    assert_eq!(result.page_elements(1).len(), 2);
    assert_eq!(result.page_elements(2).len(), 2);

    // Element ids carry the page number and each element stays on its page
    assert_eq!(result.page_elements(1)[0].id, "element-1-1");
    assert_eq!(result.page_elements(2)[0].id, "element-2-1");
    assert!(result.page_elements(1).iter().all(|e| e.page_number == 1));
    assert!(result.page_elements(2).iter().all(|e| e.page_number == 2));

    // Per-page field synthesis through the pipeline's configuration
    let synthesis = pipeline.synthesize_page(&result, 2);
    assert_eq!(synthesis.fields.len(), 1);
    assert_eq!(synthesis.fields[0].field_type, formsense::FieldType::Email);
    assert_eq!(
        synthesis.fields[0].default_value.as_deref(),
        Some("jane@example.com")
    );
}

#[test]
fn test_out_of_range_page_degrades_to_empty() {
    let provider = StaticProvider::new("export", vec![page_graph("Name:", "Jane")]);
    let pipeline = DocumentPipeline::new(provider, AnalyzeOptions::default());
    let result = pipeline.process(&inputs(3));

    assert_eq!(result.failed_pages(), vec![2, 3]);
    assert_eq!(result.page_elements(1).len(), 2);
    assert!(result.page_elements(2).is_empty());
    assert_eq!(result.pages.len(), 3);
    // Aggregate confidence still reflects the page that worked
    assert!(result.metadata.confidence > 90.0);
}

#[test]
fn test_review_session_click_selects_label() {
    let provider = StaticProvider::new("export", vec![page_graph("Name:", "Jane")]);
    let pipeline = DocumentPipeline::new(provider, AnalyzeOptions::default());
    let result = pipeline.process(&inputs(1));

    let mut session = ReviewSession::new(&result);
    // 1000x1000 image shown full-size in a 1000x1000 viewport
    let transform = ViewTransform::fit(1000.0, 1000.0, 1000.0, 1000.0, 1.0);

    // The label spans normalized x 0.10..0.20 at y 0.20..0.22
    let hit = session.select_at(&transform, 150.0, 210.0);
    assert_eq!(hit.as_deref(), Some("element-1-1"));
    assert_eq!(session.selected_element_id(), Some("element-1-1"));

    // A click in empty space clears the selection
    assert!(session.select_at(&transform, 900.0, 900.0).is_none());
    assert!(session.selected_element_id().is_none());
}

#[test]
fn test_hit_test_maps_display_coordinates() {
    let provider = StaticProvider::new("export", vec![page_graph("Name:", "Jane")]);
    let pipeline = DocumentPipeline::new(provider, AnalyzeOptions::default());
    let result = pipeline.process(&inputs(1));

    // 1000x1000 image fit into a 500x500 viewport at 90%
    let transform = ViewTransform::fit(1000.0, 1000.0, 500.0, 500.0, 0.9);
    let elements = result.page_elements(1);

    // Center of the value box (normalized 0.325, 0.21) through the
    // forward transform lands back on the same element
    let rect = transform.to_display(&elements[1].bounding_box);
    let hit = hit_test(
        elements,
        &transform,
        rect.x + rect.width / 2.0,
        rect.y + rect.height / 2.0,
    );
    assert_eq!(hit.map(|e| e.id.as_str()), Some("element-1-2"));
}
