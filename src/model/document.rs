//! Document-level types.

use super::{Block, Paragraph, Table};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A document as returned by the document source.
///
/// The converter only reads it; nothing in the rendering path mutates a
/// document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier (empty when unknown)
    pub document_id: String,

    /// Document title
    pub title: String,

    /// Body blocks in document order
    pub blocks: Vec<Block>,

    /// Embedded images keyed by inline object id
    pub images: BTreeMap<String, InlineImage>,

    /// List definitions keyed by list id
    pub lists: HashMap<String, ListDefinition>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add a paragraph to the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Add a table to the body.
    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// Add a section break to the body.
    pub fn add_section_break(&mut self) {
        self.blocks.push(Block::SectionBreak);
    }

    /// Register a list definition.
    pub fn add_list(&mut self, id: impl Into<String>, list: ListDefinition) {
        self.lists.insert(id.into(), list);
    }

    /// Register an embedded image.
    pub fn add_image(&mut self, id: impl Into<String>, image: InlineImage) {
        self.images.insert(id.into(), image);
    }

    /// Get a list definition by id.
    pub fn get_list(&self, id: &str) -> Option<&ListDefinition> {
        self.lists.get(id)
    }

    /// Check if the document body has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// An embedded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// Where the image bytes can be downloaded from
    pub source_uri: String,
}

impl InlineImage {
    /// Create an image reference.
    pub fn new(source_uri: impl Into<String>) -> Self {
        Self {
            source_uri: source_uri.into(),
        }
    }
}

/// A list definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDefinition {
    /// Numbering scheme of the list's first nesting level
    pub glyph_type: GlyphType,
}

impl ListDefinition {
    /// An ordered (decimal) list.
    pub fn ordered() -> Self {
        Self {
            glyph_type: GlyphType::Decimal,
        }
    }

    /// A bulleted list.
    pub fn unordered() -> Self {
        Self {
            glyph_type: GlyphType::Unspecified,
        }
    }

    /// Check if the list renders with numeric markers.
    pub fn is_ordered(&self) -> bool {
        self.glyph_type == GlyphType::Decimal
    }
}

/// List numbering scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphType {
    /// `DECIMAL`
    Decimal,
    /// Any other declared glyph type (`ALPHA`, `ROMAN`, ...)
    Other(String),
    /// No glyph type declared (symbol bullets)
    Unspecified,
}

impl GlyphType {
    /// Parse a glyph type value.
    pub fn parse(value: &str) -> Self {
        match value {
            "DECIMAL" => GlyphType::Decimal,
            "" | "GLYPH_TYPE_UNSPECIFIED" => GlyphType::Unspecified,
            other => GlyphType::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new("Report");
        assert!(doc.is_empty());
        assert_eq!(doc.title, "Report");
    }

    #[test]
    fn test_image_map_iterates_by_id() {
        let mut doc = Document::new("Images");
        doc.add_image("kix.b", InlineImage::new("https://img/b"));
        doc.add_image("kix.a", InlineImage::new("https://img/a"));

        let uris: Vec<_> = doc.images.values().map(|i| i.source_uri.as_str()).collect();
        assert_eq!(uris, vec!["https://img/a", "https://img/b"]);
    }

    #[test]
    fn test_glyph_type_parse() {
        assert_eq!(GlyphType::parse("DECIMAL"), GlyphType::Decimal);
        assert_eq!(GlyphType::parse(""), GlyphType::Unspecified);
        assert_eq!(
            GlyphType::parse("UPPER_ROMAN"),
            GlyphType::Other("UPPER_ROMAN".to_string())
        );
        assert!(ListDefinition::ordered().is_ordered());
        assert!(!ListDefinition::unordered().is_ordered());
    }
}
