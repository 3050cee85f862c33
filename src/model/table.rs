//! Reconstructed table types.

use super::BoundingBox;
use serde::{Deserialize, Serialize};

/// A table reconstructed from the block graph.
///
/// The grid is dense: `cells[row][col]` is `None` for positions no cell
/// block claimed (unpopulated spans of merged cells are left empty, not
/// merged). `rows × columns` equals the maximum observed 1-based
/// row/column index among the table's cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Source block id
    pub id: String,

    /// Number of rows
    pub rows: usize,

    /// Number of columns
    pub columns: usize,

    /// Dense cell grid, indexed `[row][col]`, 0-based
    pub cells: Vec<Vec<Option<TableCell>>>,

    /// Table-level recognition confidence
    pub confidence: f32,

    /// Normalized bounding box of the whole table
    pub bounding_box: BoundingBox,
}

impl Table {
    /// Create an empty table with the given dimensions.
    pub fn with_dimensions(id: impl Into<String>, rows: usize, columns: usize) -> Self {
        Self {
            id: id.into(),
            rows,
            columns,
            cells: vec![vec![None; columns]; rows],
            confidence: 0.0,
            bounding_box: BoundingBox::default(),
        }
    }

    /// Get a cell by 0-based position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Place a cell at its 0-based position, overwriting any collision.
    pub fn place(&mut self, cell: TableCell) {
        let (row, col) = (cell.row, cell.column);
        if row < self.rows && col < self.columns {
            self.cells[row][col] = Some(cell);
        }
    }

    /// Number of populated cells.
    pub fn populated_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_some())
            .count()
    }

    /// Check if the table has no populated cells.
    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0
    }

    /// Get plain text representation, rows joined by newlines and cells
    /// by tabs; unpopulated positions render as empty strings.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.as_ref().map(|c| c.text.as_str()).unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single populated table cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// 0-based row position
    pub row: usize,

    /// 0-based column position
    pub column: usize,

    /// Number of rows this cell spans
    pub row_span: usize,

    /// Number of columns this cell spans
    pub column_span: usize,

    /// Resolved cell text
    pub text: String,

    /// Recognition confidence in [0, 100]
    pub confidence: f32,
}

impl TableCell {
    /// Create a new single-span cell.
    pub fn new(row: usize, column: usize, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            row,
            column,
            row_span: 1,
            column_span: 1,
            text: text.into(),
            confidence,
        }
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.column_span > 1
    }
}
