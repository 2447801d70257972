//! Table types.

use super::{Block, Paragraph};
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }
}

/// A table cell.
///
/// Cells hold blocks like the document body does, but only paragraphs are
/// rendered; cells are emitted on a single line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub content: Vec<Block>,
}

impl TableCell {
    /// Create a new cell with a single text paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Block::Paragraph(Paragraph::with_text(text))],
        }
    }

    /// Create a cell with the given paragraphs.
    pub fn with_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            content: paragraphs.into_iter().map(Block::Paragraph).collect(),
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Paragraphs contained in the cell.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }
}
