//! Block-graph indexing and text resolution.

use crate::model::{Block, BlockKind, RelationshipKind};
use std::collections::{HashMap, HashSet};

/// An id-indexed view over one page's block graph.
///
/// External graphs are not guaranteed internally consistent:
/// relationship ids may reference blocks absent from the index. Every
/// lookup here tolerates that by skipping the dangling id, never by
/// raising.
pub struct BlockIndex<'a> {
    blocks: HashMap<&'a str, &'a Block>,
    ordered: &'a [Block],
}

impl<'a> BlockIndex<'a> {
    /// Index a slice of blocks by id.
    pub fn new(blocks: &'a [Block]) -> Self {
        let mut index = HashMap::with_capacity(blocks.len());
        for block in blocks {
            index.insert(block.id.as_str(), block);
        }
        Self {
            blocks: index,
            ordered: blocks,
        }
    }

    /// Look up a block by id.
    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.blocks.get(id).copied()
    }

    /// Iterate blocks of one kind in graph order.
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &'a Block> + '_ {
        self.ordered.iter().filter(move |b| b.block_type == kind)
    }

    /// Number of indexed blocks.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Resolve a block's display text.
    ///
    /// A block's own `Text` wins. Otherwise the CHILD relationship is
    /// followed to referenced WORD/LINE blocks and their texts are
    /// concatenated with single spaces. Returns `""` when nothing
    /// resolves.
    pub fn resolve_text(&self, block: &Block) -> String {
        if let Some(text) = &block.text {
            return text.clone();
        }

        let mut parts: Vec<&str> = Vec::new();
        for id in block.related_ids(RelationshipKind::Child) {
            let Some(child) = self.get(id) else {
                // Dangling reference, skip silently
                continue;
            };
            if !matches!(child.block_type, BlockKind::Word | BlockKind::Line) {
                continue;
            }
            if let Some(text) = child.text.as_deref() {
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }

        parts.join(" ").trim().to_string()
    }

    /// Ids referenced as CHILD of any KEY_VALUE_SET block.
    ///
    /// Used by the normalizer to avoid re-emitting text lines already
    /// captured as part of a key/value pair.
    pub fn key_value_child_ids(&self) -> HashSet<&'a str> {
        let mut ids = HashSet::new();
        for block in self.blocks_of(BlockKind::KeyValueSet) {
            for id in block.related_ids(RelationshipKind::Child) {
                ids.insert(id.as_str());
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Relationship;

    fn word(id: &str, text: &str) -> Block {
        Block {
            id: id.into(),
            block_type: BlockKind::Word,
            text: Some(text.into()),
            confidence: Some(99.0),
            geometry: None,
            entity_types: None,
            relationships: None,
            selection_status: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
        }
    }

    fn parent(id: &str, child_ids: &[&str]) -> Block {
        Block {
            relationships: Some(vec![Relationship {
                relationship_type: RelationshipKind::Child,
                ids: child_ids.iter().map(|s| s.to_string()).collect(),
            }]),
            text: None,
            ..word(id, "")
        }
    }

    #[test]
    fn test_resolve_text_from_children() {
        let blocks = vec![
            parent("key", &["w1", "w2"]),
            word("w1", "Patient"),
            word("w2", "Name:"),
        ];
        let index = BlockIndex::new(&blocks);
        assert_eq!(index.resolve_text(&blocks[0]), "Patient Name:");
    }

    #[test]
    fn test_own_text_wins() {
        let mut block = parent("l1", &["w1"]);
        block.text = Some("own text".into());
        let blocks = vec![block, word("w1", "ignored")];
        let index = BlockIndex::new(&blocks);
        assert_eq!(index.resolve_text(&blocks[0]), "own text");
    }

    #[test]
    fn test_dangling_child_ids_skipped() {
        let blocks = vec![parent("key", &["missing", "w1", "also-missing"]), word("w1", "only")];
        let index = BlockIndex::new(&blocks);
        assert_eq!(index.resolve_text(&blocks[0]), "only");
    }

    #[test]
    fn test_no_text_resolves_empty() {
        let blocks = vec![parent("key", &["nope"])];
        let index = BlockIndex::new(&blocks);
        assert_eq!(index.resolve_text(&blocks[0]), "");
    }

    #[test]
    fn test_key_value_child_ids() {
        let mut kv = parent("kv", &["w1"]);
        kv.block_type = BlockKind::KeyValueSet;
        let blocks = vec![kv, word("w1", "captured"), word("w2", "free")];
        let index = BlockIndex::new(&blocks);
        let ids = index.key_value_child_ids();
        assert!(ids.contains("w1"));
        assert!(!ids.contains("w2"));
    }
}
