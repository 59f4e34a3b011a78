//! File reading and document parsing
//!
//! One read per call: the whole file is loaded, then parsed in memory.

use crate::core::links::{rewrite_image_links, scan_image_links, LinkMap};
use crate::core::ParsedDocument;
use crate::error::{DevtoError, Result};
use std::fs;
use std::path::Path;

/// Configuration for the document reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
        }
    }
}

/// Reads markdown articles from disk
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    /// Create a new reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read the raw text of a file
    pub fn read_to_string<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();

        let metadata = fs::metadata(path).map_err(|e| map_io_error(e, path))?;
        if !metadata.is_file() {
            return Err(DevtoError::validation(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        if let Some(max_size) = self.config.max_file_size {
            if metadata.len() > max_size as u64 {
                return Err(DevtoError::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        fs::read_to_string(path).map_err(|e| map_io_error(e, path))
    }

    /// Read and parse a document from a file path
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedDocument> {
        let path = path.as_ref();
        let content = self.read_to_string(path)?;
        ParsedDocument::parse(&content, path)
    }

    /// Every distinct image target in the file's body, mapped to `""`
    pub fn image_links<P: AsRef<Path>>(&self, path: P) -> Result<LinkMap> {
        let document = self.read_file(path)?;
        Ok(scan_image_links(document.markdown_source()))
    }

    /// The file's content with image targets rewritten through `links`.
    ///
    /// The front matter block is copied verbatim, not re-encoded.
    pub fn rewrite_image_links<P: AsRef<Path>>(&self, path: P, links: &LinkMap) -> Result<String> {
        let document = self.read_file(path)?;
        let body = rewrite_image_links(document.markdown_source(), links);
        Ok(document.with_body_verbatim(&body))
    }

    /// Get reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

fn map_io_error(e: std::io::Error, path: &Path) -> DevtoError {
    match e.kind() {
        std::io::ErrorKind::NotFound => DevtoError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => DevtoError::permission_denied(path),
        _ => DevtoError::Io(e),
    }
}

/// Convenience functions for common operations
pub mod convenience {
    use super::*;

    /// Read and parse a document with default settings
    pub fn parse_document<P: AsRef<Path>>(path: P) -> Result<ParsedDocument> {
        DocumentReader::new().read_file(path)
    }

    /// Scan a file for image targets with default settings
    pub fn get_image_links<P: AsRef<Path>>(path: P) -> Result<LinkMap> {
        DocumentReader::new().image_links(path)
    }

    /// Rewrite a file's image targets with default settings
    pub fn set_image_links<P: AsRef<Path>>(path: P, links: &LinkMap) -> Result<String> {
        DocumentReader::new().rewrite_image_links(path, links)
    }
}
