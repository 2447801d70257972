//! Persistence of converted output: embedded images and Markdown files.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};

/// Persists an embedded image to a local path.
///
/// Implementations are called once per image, in document order, and must
/// either write the whole file or fail.
pub trait ImageStore {
    /// Fetch the image at `source_uri` and write it to `destination`.
    fn persist(&self, source_uri: &str, destination: &Path) -> Result<()>;
}

/// Downloads images over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpImageStore {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpImageStore {
    /// Create a store with a default HTTP client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "http")]
impl ImageStore for HttpImageStore {
    fn persist(&self, source_uri: &str, destination: &Path) -> Result<()> {
        let response = self
            .client
            .get(source_uri)
            .send()
            .map_err(|e| Error::image(source_uri, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::image(source_uri, format!("bad status: {}", status)));
        }

        let bytes = response.bytes().map_err(|e| Error::image(source_uri, e))?;
        write_file(destination, &bytes)?;
        info!("Downloaded image {} to {}", source_uri, destination.display());
        Ok(())
    }
}

/// Copies images that are already on the local filesystem.
///
/// Accepts plain paths and `file://` URIs. Relative paths are resolved
/// against `base_dir` when one is set.
#[derive(Debug, Clone, Default)]
pub struct LocalImageStore {
    base_dir: Option<PathBuf>,
}

impl LocalImageStore {
    /// Create a store that resolves relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn resolve(&self, source_uri: &str) -> PathBuf {
        let path = Path::new(source_uri.strip_prefix("file://").unwrap_or(source_uri));
        match self.base_dir {
            Some(ref base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageStore for LocalImageStore {
    fn persist(&self, source_uri: &str, destination: &Path) -> Result<()> {
        let source = self.resolve(source_uri);
        let bytes = fs::read(&source).map_err(|e| Error::image(source_uri, e))?;
        write_file(destination, &bytes)?;
        info!("Copied image {} to {}", source.display(), destination.display());
        Ok(())
    }
}

/// Write `content` to `dir/file_name`, creating `dir` first.
///
/// Returns the path of the written file.
pub fn save_markdown(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    write_file(&path, content.as_bytes())?;
    info!("Markdown file saved at: {}", path.display());
    Ok(path)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_markdown_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("out").join("My Doc");

        let path = save_markdown(&dir, "document.md", "# My Doc\n\n").unwrap();

        assert_eq!(path, dir.join("document.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# My Doc\n\n");
    }

    #[test]
    fn test_local_store_copies_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pic.jpg"), b"\xFF\xD8jpeg").unwrap();

        let store = LocalImageStore::new().with_base_dir(tmp.path());
        let destination = tmp.path().join("out").join("image1.jpg");
        store.persist("pic.jpg", &destination).unwrap();

        assert_eq!(fs::read(&destination).unwrap(), b"\xFF\xD8jpeg");
    }

    #[test]
    fn test_local_store_accepts_file_uri() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("pic.jpg");
        fs::write(&source, b"data").unwrap();

        let destination = tmp.path().join("copy.jpg");
        LocalImageStore::new()
            .persist(&format!("file://{}", source.display()), &destination)
            .unwrap();

        assert_eq!(fs::read(&destination).unwrap(), b"data");
    }

    #[test]
    fn test_local_store_missing_source_is_image_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalImageStore::new()
            .with_base_dir(tmp.path())
            .persist("missing.jpg", &tmp.path().join("x.jpg"))
            .unwrap_err();
        assert!(matches!(err, Error::Image { ref uri, .. } if uri == "missing.jpg"));
    }
}
