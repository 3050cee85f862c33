//! Key/value pair extraction.

use super::BlockIndex;
use crate::model::{BlockKind, BoundingBox, EntityType, RelationshipKind};

/// One extracted label/value pairing.
#[derive(Debug, Clone)]
pub struct KeyValuePair {
    /// Resolved key text
    pub key: String,

    /// Resolved value text (empty when the key has no usable value)
    pub value: String,

    /// Bounding box of the key block
    pub key_bounding_box: BoundingBox,

    /// Bounding box of the value block, when one exists
    pub value_bounding_box: Option<BoundingBox>,

    /// Confidence of the key block
    pub confidence: f32,
}

/// Extract label/value pairings from the block graph.
///
/// For every KEY_VALUE_SET block carrying the KEY entity type, the key
/// text is resolved and the VALUE relationship followed to its paired
/// VALUE block. A KEY without a reachable VALUE, or a VALUE whose
/// children carry no text, degrades to an empty value rather than an
/// error.
///
/// Pairs are keyed by key text: when two keys resolve to the same text
/// the later one overwrites the earlier, in place. This is a documented
/// limitation of the upstream pipeline, not an error.
pub fn extract_key_values(index: &BlockIndex<'_>) -> Vec<KeyValuePair> {
    let mut pairs: Vec<KeyValuePair> = Vec::new();

    for block in index.blocks_of(BlockKind::KeyValueSet) {
        if !block.has_entity_type(EntityType::Key) {
            continue;
        }

        let key = index.resolve_text(block);
        if key.is_empty() {
            continue;
        }

        let value_block = block
            .related_ids(RelationshipKind::Value)
            .iter()
            .filter_map(|id| index.get(id))
            .find(|b| b.has_entity_type(EntityType::Value));

        let (value, value_bounding_box) = match value_block {
            Some(vb) => (index.resolve_text(vb), Some(vb.bounding_box())),
            None => (String::new(), None),
        };

        let pair = KeyValuePair {
            key,
            value,
            key_bounding_box: block.bounding_box(),
            value_bounding_box,
            confidence: block.confidence_or(0.0),
        };

        match pairs.iter().position(|p| p.key == pair.key) {
            Some(existing) => {
                log::debug!("Duplicate key text '{}', keeping later pair", pair.key);
                pairs[existing] = pair;
            }
            None => pairs.push(pair),
        }
    }

    pairs
}
