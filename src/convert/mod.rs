//! Document conversion: the whole-document pass that turns a [`Document`]
//! into Markdown.
//!
//! The converter writes an optional title line, every body block in order,
//! then one image reference per embedded image, and finally runs the
//! formatting consolidator over the result.
//!
//! # Example
//!
//! ```no_run
//! use gdocs2md::convert::{ConvertOptions, DocumentConverter};
//! use gdocs2md::storage::HttpImageStore;
//! use gdocs2md::Document;
//!
//! fn main() -> gdocs2md::Result<()> {
//!     let doc = Document::new("Report");
//!     let converter = DocumentConverter::new(
//!         ConvertOptions::new().with_image_dir("out/Report").with_stats(true),
//!     );
//!     let result = converter.convert(&doc, &HttpImageStore::new())?;
//!     println!("{}", result.markdown);
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use log::{debug, info};

use crate::error::Result;
use crate::model::Document;
use crate::render::{consolidate, BlockRenderer, ExtractionStats};
use crate::storage::ImageStore;

/// Options for document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory images are persisted into (file name only when `None`)
    pub image_dir: Option<PathBuf>,

    /// Whether to emit the `# title` line
    pub include_title: bool,

    /// Whether to run the formatting consolidator
    pub consolidate: bool,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            image_dir: None,
            include_title: true,
            consolidate: true,
            collect_stats: false,
        }
    }
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory images are persisted into.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }

    /// Enable or disable the title line.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Enable or disable formatting consolidation.
    pub fn with_consolidation(mut self, enabled: bool) -> Self {
        self.consolidate = enabled;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

/// An image written during conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Inline object id in the document
    pub object_id: String,

    /// Where the image was downloaded from
    pub source_uri: String,

    /// File name referenced from the Markdown (`imageN.jpg`)
    pub file_name: String,
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted Markdown
    pub markdown: String,

    /// Document title
    pub title: String,

    /// Images in the order they were referenced
    pub images: Vec<ExportedImage>,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,
}

impl ConvertResult {
    /// Split into `(markdown, title)`.
    pub fn into_parts(self) -> (String, String) {
        (self.markdown, self.title)
    }
}

/// Whole-document converter.
#[derive(Debug, Clone, Default)]
pub struct DocumentConverter {
    options: ConvertOptions,
}

impl DocumentConverter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert `doc`, persisting its images through `store`.
    ///
    /// Images are persisted one at a time in object id order; the first
    /// failure aborts the conversion.
    pub fn convert(&self, doc: &Document, store: &dyn ImageStore) -> Result<ConvertResult> {
        let mut output = String::new();
        let mut stats = self.options.collect_stats.then(ExtractionStats::new);

        if self.options.include_title {
            output.push_str("# ");
            output.push_str(&doc.title);
            output.push_str("\n\n");
        }

        let renderer = BlockRenderer::new(doc);
        for block in &doc.blocks {
            renderer.render_into(&mut output, block)?;
            if let Some(stats) = stats.as_mut() {
                stats.record_block(block);
            }
        }

        let mut images = Vec::with_capacity(doc.images.len());
        for (index, (object_id, image)) in doc.images.iter().enumerate() {
            let file_name = format!("image{}.jpg", index + 1);
            let destination = match self.options.image_dir {
                Some(ref dir) => dir.join(&file_name),
                None => PathBuf::from(&file_name),
            };

            debug!("Persisting image {} to {}", object_id, destination.display());
            store.persist(&image.source_uri, &destination)?;

            output.push_str(&format!("![Image]({})\n\n", file_name));
            if let Some(stats) = stats.as_mut() {
                stats.add_image();
            }
            images.push(ExportedImage {
                object_id: object_id.clone(),
                source_uri: image.source_uri.clone(),
                file_name,
            });
        }

        let markdown = if self.options.consolidate {
            consolidate(&output)
        } else {
            output
        };

        info!(
            "Converted '{}': {} block(s), {} image(s)",
            doc.title,
            doc.blocks.len(),
            images.len()
        );

        Ok(ConvertResult {
            markdown,
            title: doc.title.clone(),
            images,
            stats,
        })
    }
}
