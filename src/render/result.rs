//! Conversion statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Block, Document, Paragraph};

/// Statistics collected while converting a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of plain paragraphs rendered
    pub paragraph_count: u32,

    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of list items rendered
    pub list_item_count: u32,

    /// Number of tables rendered
    pub table_count: u32,

    /// Number of section breaks rendered
    pub section_break_count: u32,

    /// Number of images persisted
    pub image_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect block and text counts for a whole document.
    ///
    /// Images are not counted here; they are counted as they are persisted.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            stats.record_block(block);
        }
        stats
    }

    /// Record one body block.
    pub fn record_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(p) => self.record_paragraph(p),
            Block::Table(t) => {
                self.add_table();
                for para in t.rows.iter().flat_map(|r| &r.cells).flat_map(|c| c.paragraphs()) {
                    self.count_text(&para.plain_text());
                }
            }
            Block::SectionBreak => self.add_section_break(),
        }
    }

    fn record_paragraph(&mut self, para: &Paragraph) {
        if para.heading_level().is_some() {
            self.add_heading();
        } else if para.list_id().is_some() {
            self.add_list_item();
        } else {
            self.add_paragraph();
        }
        self.count_text(&para.plain_text());
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment section break count.
    pub fn add_section_break(&mut self) {
        self.section_break_count += 1;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.section_break_count += other.section_break_count;
        self.image_count += other.image_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListDefinition, Table, TableRow};

    #[test]
    fn test_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_from_document() {
        let mut doc = Document::new("Stats");
        doc.add_list("l", ListDefinition::unordered());
        doc.add_paragraph(Paragraph::heading("Intro\n", 1));
        doc.add_paragraph(Paragraph::with_text("Some body text\n"));
        doc.add_paragraph(Paragraph::list_item("item\n", "l"));
        doc.add_section_break();
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a b", "c"]));
        doc.add_table(table);

        let stats = ExtractionStats::from_document(&doc);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.list_item_count, 1);
        assert_eq!(stats.section_break_count, 1);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.word_count, 8);
        assert_eq!(stats.image_count, 0);
    }

    #[test]
    fn test_merge() {
        let mut stats1 = ExtractionStats::new();
        stats1.paragraph_count = 5;
        stats1.table_count = 2;

        let stats2 = ExtractionStats {
            paragraph_count: 3,
            table_count: 1,
            image_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.image_count, 4);
    }
}
