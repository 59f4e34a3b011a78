//! devto: prepare markdown articles for dev.to
//!
//! This library reads a markdown article with a YAML front matter block,
//! decodes the metadata dev.to cares about, and rewrites image links
//! according to a per-article mapping so local images can point at hosted
//! copies before the article is submitted.
//!
//! # Quick Start
//!
//! ## Reading an article
//!
//! ```rust,no_run
//! use devto::{convenience, Result};
//!
//! fn main() -> Result<()> {
//!     let document = convenience::parse_document("article.md")?;
//!     println!("{:?}", document.front_matter().title);
//!     Ok(())
//! }
//! ```
//!
//! ## Rewriting image links
//!
//! ```rust,no_run
//! use devto::{convenience, prefix_links, Result};
//!
//! fn main() -> Result<()> {
//!     // Every image target, each mapped to "" (keep as written)
//!     let links = convenience::get_image_links("article.md")?;
//!
//!     // Point the unmapped ones at a hosted copy
//!     let links = prefix_links(links, "https://raw.githubusercontent.com/me/blog/main/", false);
//!
//!     let content = convenience::set_image_links("article.md", &links)?;
//!     print!("{content}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: parsing, front matter and link reconciliation; pure functions
//! - [`io`]: reading articles and atomic writes
//! - [`config`]: the per-article `devto.yml` and process [`Settings`]
//! - [`publish`]: generate/submit workflows and the [`ArticleSubmitter`] seam
//! - [`error`]: the [`DevtoError`] type

// Public API exports
pub use error::{DevtoError, Result};

// Core types
pub use crate::core::{
    prefix_links, rewrite_image_links, scan_image_links, FrontMatter, FrontMatterFormat, LinkMap,
    ParsedDocument,
};

// IO types
pub use io::{convenience, write_atomic, DocumentReader, ReaderConfig};

pub use config::{ArticleConfig, Settings};
pub use publish::{ArticlePayload, ArticleSubmitter, DryRunSubmitter, Publisher, SubmitOptions};

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod publish;

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_end_to_end_workflow() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = "---\ntitle: Test Document\ntags: rust, test\n---\n# Hello\n\n![shot](./shot.png)\n";
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let document = convenience::parse_document(temp_file.path()).unwrap();
        assert_eq!(document.front_matter().tags.as_deref(), Some("rust, test"));

        let links = convenience::get_image_links(temp_file.path()).unwrap();
        let links = prefix_links(links, "https://cdn.example/", false);
        let rewritten = convenience::set_image_links(temp_file.path(), &links).unwrap();

        assert_eq!(
            rewritten,
            "---\ntitle: Test Document\ntags: rust, test\n---\n# Hello\n\n![shot](https://cdn.example/./shot.png)\n"
        );
    }

    #[test]
    fn test_error_handling() {
        let result = convenience::parse_document("/nonexistent/file.md");
        assert!(matches!(
            result.unwrap_err(),
            DevtoError::FileNotFound { .. }
        ));
    }
}
