//! Table reconstruction from CELL blocks.

use super::BlockIndex;
use crate::model::{BlockKind, RelationshipKind, Table, TableCell};

/// Confidence assigned to cells whose block carries none.
pub const DEFAULT_CELL_CONFIDENCE: f32 = 95.0;

/// Reconstruct dense tables from the block graph, one per TABLE block.
///
/// Cell positions arrive 1-based on the wire and are placed 0-based;
/// spans default to 1. The grid spans the maximum observed row/column
/// index; positions no cell claims stay `None`. Colliding placements
/// (from spans) simply overwrite, no merge semantics.
pub fn reconstruct_tables(index: &BlockIndex<'_>) -> Vec<Table> {
    let mut tables = Vec::new();

    for table_block in index.blocks_of(BlockKind::Table) {
        let cell_blocks: Vec<_> = table_block
            .related_ids(RelationshipKind::Child)
            .iter()
            .filter_map(|id| index.get(id))
            .filter(|b| b.block_type == BlockKind::Cell)
            .collect();

        let mut max_row = 0usize;
        let mut max_col = 0usize;
        let mut cells = Vec::with_capacity(cell_blocks.len());

        for cell_block in cell_blocks {
            let (Some(row_index), Some(column_index)) =
                (cell_block.row_index, cell_block.column_index)
            else {
                log::debug!("Cell block {} has no position, skipping", cell_block.id);
                continue;
            };
            if row_index == 0 || column_index == 0 {
                continue;
            }

            max_row = max_row.max(row_index as usize);
            max_col = max_col.max(column_index as usize);

            cells.push(TableCell {
                row: (row_index - 1) as usize,
                column: (column_index - 1) as usize,
                row_span: cell_block.row_span.unwrap_or(1) as usize,
                column_span: cell_block.column_span.unwrap_or(1) as usize,
                text: index.resolve_text(cell_block),
                confidence: cell_block.confidence_or(DEFAULT_CELL_CONFIDENCE),
            });
        }

        let mut table = Table::with_dimensions(&table_block.id, max_row, max_col);
        table.confidence = table_block.confidence_or(DEFAULT_CELL_CONFIDENCE);
        table.bounding_box = table_block.bounding_box();
        for cell in cells {
            table.place(cell);
        }

        tables.push(table);
    }

    tables
}
