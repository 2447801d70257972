//! Block-level types.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// One top-level structural unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text (body text, heading or list item)
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// A section break
    SectionBreak,
}

impl Block {
    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is a section break.
    pub fn is_section_break(&self) -> bool {
        matches!(self, Block::SectionBreak)
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl From<Table> for Block {
    fn from(t: Table) -> Self {
        Block::Table(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_variants() {
        let p: Block = Paragraph::with_text("x").into();
        assert!(p.is_paragraph());
        assert!(!p.is_table());

        let t: Block = Table::new().into();
        assert!(t.is_table());

        assert!(Block::SectionBreak.is_section_break());
    }
}
