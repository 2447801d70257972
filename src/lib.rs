//! # gdocs2md
//!
//! Converts structured word-processor documents (the JSON returned by the
//! Google Docs API) into Markdown.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gdocs2md::storage::HttpImageStore;
//!
//! fn main() -> gdocs2md::Result<()> {
//!     let doc = gdocs2md::parse_file("exports/report.json")?;
//!     let (markdown, title) = gdocs2md::convert(&doc, &HttpImageStore::new())?;
//!     println!("{}\n{}", title, markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Inline styles**: bold, italic, underline (`<ins>`), strikethrough, links
//! - **Blocks**: headings, list items, tables, section breaks
//! - **Images**: persisted through a pluggable [`ImageStore`]
//! - **Consolidation**: repairs formatting split across lines
//! - **Export**: comments and revisions written next to the document

pub mod convert;
pub mod error;
pub mod export;
pub mod model;
pub mod render;
pub mod source;
pub mod storage;

// Re-export commonly used types
pub use convert::{ConvertOptions, ConvertResult, DocumentConverter, ExportedImage};
pub use error::{Error, Result};
pub use export::{list_container, ContainerListing, ExportSummary, Exporter};
pub use model::{
    Block, Comment, Document, InlineImage, ListDefinition, Paragraph, ParagraphStyle, Revision,
    Table, TableCell, TableRow, TextRun, TextStyle,
};
pub use render::{ExtractionStats, FormattingConsolidator};
pub use source::{DocumentSource, JsonFileSource};
pub use storage::ImageStore;

use std::fs;
use std::path::Path;

/// Convert a document to Markdown with default options.
///
/// Images are persisted under their bare file names (`image1.jpg`, ...).
/// Returns `(markdown, title)`.
///
/// # Example
///
/// ```no_run
/// use gdocs2md::{convert, Document};
/// use gdocs2md::storage::LocalImageStore;
///
/// let doc = Document::new("Empty");
/// let (markdown, title) = convert(&doc, &LocalImageStore::new()).unwrap();
/// assert_eq!(markdown, "# Empty\n\n");
/// ```
pub fn convert(doc: &Document, store: &dyn ImageStore) -> Result<(String, String)> {
    convert_with_options(doc, store, ConvertOptions::default())
}

/// Convert a document to Markdown with custom options.
pub fn convert_with_options(
    doc: &Document,
    store: &dyn ImageStore,
    options: ConvertOptions,
) -> Result<(String, String)> {
    let result = DocumentConverter::new(options).convert(doc, store)?;
    Ok(result.into_parts())
}

/// Repair Markdown formatting split across lines.
///
/// # Example
///
/// ```
/// assert_eq!(
///     gdocs2md::consolidate("**Line1isbold\nmore**"),
///     "**Line1isboldmore**\n\n"
/// );
/// ```
pub fn consolidate(text: &str) -> String {
    render::consolidate(text)
}

/// Parse a document from its API JSON.
pub fn parse_json(json: &str) -> Result<Document> {
    source::from_api_json(json)
}

/// Parse a document from an API JSON file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let json = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::Fetch(format!("unable to read {}: {}", path.as_ref().display(), e))
    })?;
    parse_json(&json)
}
