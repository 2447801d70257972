//! Document sources: where documents, comments and revisions come from.

pub mod api;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::model::{Comment, CommentList, Document, Revision, RevisionList};

pub use api::from_api_json;

static DOCUMENT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://docs\.google\.com/document/(?:u/\d+/)?d/([a-zA-Z0-9_-]+)")
        .expect("document URL pattern is valid")
});

static FOLDER_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://drive\.google\.com/drive/(?:u/\d+/)?folders/([a-zA-Z0-9_-]+)")
        .expect("folder URL pattern is valid")
});

/// Extract the folder id from a folder URL.
///
/// Like [`extract_document_id`], other input is returned unchanged.
pub fn extract_folder_id(input: &str) -> &str {
    FOLDER_URL
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map_or(input, |m| m.as_str())
}

/// Extract the document id from a document URL.
///
/// Anything that is not a document URL is returned unchanged, so ids and
/// file paths pass straight through.
pub fn extract_document_id(input: &str) -> &str {
    DOCUMENT_URL
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map_or(input, |m| m.as_str())
}

/// Supplies documents by identifier.
///
/// Only [`fetch`](DocumentSource::fetch) is required; sources without
/// comment or revision history report none.
pub trait DocumentSource {
    /// Retrieve a document. Failures are reported as [`Error::Fetch`].
    fn fetch(&self, id: &str) -> Result<Document>;

    /// Comments on a document, in listing order.
    fn comments(&self, _id: &str) -> Result<Vec<Comment>> {
        Ok(Vec::new())
    }

    /// Revisions of a document, in listing order.
    fn revisions(&self, _id: &str) -> Result<Vec<Revision>> {
        Ok(Vec::new())
    }

    /// Plain-text content of one revision.
    fn revision_content(&self, id: &str, revision_id: &str) -> Result<String> {
        Err(Error::Fetch(format!(
            "revision {} of {} is not available from this source",
            revision_id, id
        )))
    }

    /// Ids of the documents in a container, in a stable order. Each id is
    /// accepted by [`fetch`](DocumentSource::fetch).
    fn list(&self, container: &str) -> Result<Vec<String>> {
        Err(Error::Fetch(format!(
            "listing {} is not supported by this source",
            container
        )))
    }

    /// Display name of a container.
    fn container_name(&self, container: &str) -> Result<String> {
        Ok(container.to_string())
    }
}

/// Reads exported API JSON from a directory.
///
/// For a document id `ID` the files are:
///
/// - `ID.json` - the document
/// - `ID.comments.json` - `{"comments": [...]}` (optional)
/// - `ID.revisions.json` - `{"revisions": [...]}` (optional)
/// - `ID.REV.txt` - plain text of revision `REV`
///
/// An id that names an existing `.json` file is read directly, and its
/// siblings are looked up next to it. A container is a directory below the
/// root; its documents are the `.json` files that are not listings.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    root: PathBuf,
}

impl JsonFileSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `id` to `(directory, stem)`.
    fn locate(&self, id: &str) -> (PathBuf, String) {
        let direct = Path::new(id);
        if direct.extension().is_some_and(|e| e == "json") && direct.is_file() {
            let dir = direct
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            let stem = direct
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            return (dir, stem);
        }
        (self.root.clone(), id.to_string())
    }

    fn sibling(&self, id: &str, suffix: &str) -> PathBuf {
        let (dir, stem) = self.locate(id);
        dir.join(format!("{}{}", stem, suffix))
    }

    fn read_optional<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        if !path.exists() {
            debug!("{} not found, assuming none", path.display());
            return Ok(T::default());
        }
        let json = read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| Error::Fetch(format!("invalid JSON in {}: {}", path.display(), e)))
    }
}

impl DocumentSource for JsonFileSource {
    fn fetch(&self, id: &str) -> Result<Document> {
        let path = self.sibling(id, ".json");
        debug!("Reading document {} from {}", id, path.display());
        from_api_json(&read_to_string(&path)?)
    }

    fn comments(&self, id: &str) -> Result<Vec<Comment>> {
        let list: CommentList = self.read_optional(&self.sibling(id, ".comments.json"))?;
        Ok(list.comments)
    }

    fn revisions(&self, id: &str) -> Result<Vec<Revision>> {
        let list: RevisionList = self.read_optional(&self.sibling(id, ".revisions.json"))?;
        Ok(list.revisions)
    }

    fn revision_content(&self, id: &str, revision_id: &str) -> Result<String> {
        read_to_string(&self.sibling(id, &format!(".{}.txt", revision_id)))
    }

    fn list(&self, container: &str) -> Result<Vec<String>> {
        let dir = self.root.join(container);
        let entries = fs::read_dir(&dir)
            .map_err(|e| Error::Fetch(format!("unable to list {}: {}", dir.display(), e)))?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_document = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_document_file);
            if is_document && path.is_file() {
                ids.push(path.to_string_lossy().into_owned());
            }
        }
        ids.sort();

        debug!("Found {} document(s) in {}", ids.len(), dir.display());
        Ok(ids)
    }

    fn container_name(&self, container: &str) -> Result<String> {
        let dir = self.root.join(container);
        let dir = fs::canonicalize(&dir)
            .map_err(|e| Error::Fetch(format!("unable to resolve {}: {}", dir.display(), e)))?;
        dir.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Fetch(format!("{} has no folder name", dir.display())))
    }
}

fn is_document_file(name: &str) -> bool {
    name.ends_with(".json")
        && !name.ends_with(".comments.json")
        && !name.ends_with(".revisions.json")
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::Fetch(format!("unable to read {}: {}", path.display(), e)))
}
