//! End-to-end export of documents to a directory tree.
//!
//! Each document is written to `<output_dir>/<title>/`:
//!
//! - `document.md` - the converted document followed by its comments
//! - `imageN.jpg` - embedded images
//! - `<timestamp>_<revision>.md` - one file per revision (optional)
//!
//! Exporting a whole container nests those folders one level deeper, under
//! `<output_dir>/<container name>/`.

use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;
use serde::Serialize;

use crate::convert::{ConvertOptions, DocumentConverter};
use crate::error::Result;
use crate::render::{render_comments, render_revision, revision_file_name, ExtractionStats};
use crate::source::DocumentSource;
use crate::storage::{save_markdown, ImageStore};

/// Name of the converted document inside its folder.
pub const DOCUMENT_FILE_NAME: &str = "document.md";

/// What one export produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Document id as requested
    pub document_id: String,

    /// Document title
    pub title: String,

    /// Folder the document was written to
    pub folder: PathBuf,

    /// Path of `document.md`
    pub document_path: PathBuf,

    /// Number of images written
    pub image_count: usize,

    /// Number of comments appended
    pub comment_count: usize,

    /// Paths of the revision files
    pub revision_paths: Vec<PathBuf>,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,
}

/// Fetches, converts and saves documents.
pub struct Exporter<'a> {
    source: &'a dyn DocumentSource,
    store: &'a dyn ImageStore,
    options: ConvertOptions,
    output_dir: PathBuf,
    include_revisions: bool,
}

impl<'a> Exporter<'a> {
    /// Create an exporter writing below `output_dir`.
    pub fn new(
        source: &'a dyn DocumentSource,
        store: &'a dyn ImageStore,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            store,
            options: ConvertOptions::default(),
            output_dir: output_dir.into(),
            include_revisions: true,
        }
    }

    /// Set conversion options. The image directory is always the
    /// document's folder and is overridden per export.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable or disable revision export.
    pub fn with_revisions(mut self, include: bool) -> Self {
        self.include_revisions = include;
        self
    }

    /// Export one document.
    pub fn export(&self, id: &str) -> Result<ExportSummary> {
        info!("Retrieving document with ID: {}", id);
        let doc = self.source.fetch(id)?;

        let folder = self.output_dir.join(folder_name(&doc.title, id));
        let converter =
            DocumentConverter::new(self.options.clone().with_image_dir(folder.clone()));
        let result = converter.convert(&doc, self.store)?;

        let comments = self.source.comments(id)?;
        let mut markdown = result.markdown;
        markdown.push_str(&render_comments(&comments));

        let document_path = save_markdown(&folder, DOCUMENT_FILE_NAME, &markdown)?;

        let mut revision_paths = Vec::new();
        if self.include_revisions {
            for revision in self.source.revisions(id)? {
                let content = self.source.revision_content(id, &revision.id)?;
                let file_name = revision_file_name(&Local::now().naive_local(), &revision.id);
                let path =
                    save_markdown(&folder, &file_name, &render_revision(&revision, &content))?;
                revision_paths.push(path);
            }
        }

        Ok(ExportSummary {
            document_id: id.to_string(),
            title: result.title,
            folder,
            document_path,
            image_count: result.images.len(),
            comment_count: comments.len(),
            revision_paths,
            stats: result.stats,
        })
    }
}

/// The documents of one container and where they are exported.
#[derive(Debug, Clone)]
pub struct ContainerListing {
    /// Container name as reported by the source
    pub name: String,

    /// Output folder for the container's documents
    pub folder: PathBuf,

    /// Document ids, in listing order
    pub documents: Vec<String>,
}

/// List the documents of `container` and the folder to export them into.
pub fn list_container(
    source: &dyn DocumentSource,
    container: &str,
    output_dir: &Path,
) -> Result<ContainerListing> {
    let name = source.container_name(container)?;
    let documents = source.list(container)?;
    info!("Container {} holds {} document(s)", name, documents.len());

    Ok(ContainerListing {
        folder: output_dir.join(folder_name(&name, container)),
        name,
        documents,
    })
}

/// Folder name for a document: its title with path separators replaced,
/// or the id when the title is blank.
fn folder_name(title: &str, id: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." {
        id.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_name() {
        assert_eq!(folder_name("Quarterly Report", "id"), "Quarterly Report");
        assert_eq!(folder_name("Q1/Q2 plan", "id"), "Q1-Q2 plan");
        assert_eq!(folder_name("   ", "doc-7"), "doc-7");
        assert_eq!(folder_name("..", "doc-7"), "doc-7");
    }
}
