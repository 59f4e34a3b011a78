//! Parsed article model
//!
//! [`ParsedDocument`] is an immutable snapshot of one markdown file: the raw
//! front matter block, its decoded [`FrontMatter`], and the untouched body.

use crate::core::front_matter::{self, FrontMatter, FrontMatterFormat, DELIMITER};
use crate::error::Result;
use std::path::Path;

/// A markdown document split into front matter and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    front_matter_format: FrontMatterFormat,
    front_matter_source: String,
    front_matter: FrontMatter,
    markdown_source: String,
    raw_header: String,
}

impl ParsedDocument {
    /// Parse document text; `path` only labels errors
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let Some(split) = front_matter::split(content) else {
            return Ok(Self::body_only(content.to_string()));
        };

        let front_matter = FrontMatter::decode(split.source, path)?;

        Ok(Self {
            front_matter_format: FrontMatterFormat::Yaml,
            front_matter_source: split.source.to_string(),
            front_matter,
            markdown_source: split.body.to_string(),
            raw_header: split.header.to_string(),
        })
    }

    /// A document with no front matter block
    pub fn body_only(body: String) -> Self {
        Self {
            front_matter_format: FrontMatterFormat::Yaml,
            front_matter_source: String::new(),
            front_matter: FrontMatter::default(),
            markdown_source: body,
            raw_header: String::new(),
        }
    }

    /// Copy of this document carrying different front matter.
    ///
    /// The raw block is left as it was; [`content`](Self::content) encodes
    /// the new values.
    pub fn with_front_matter(&self, front_matter: FrontMatter) -> Self {
        Self {
            front_matter,
            ..self.clone()
        }
    }

    pub fn front_matter_format(&self) -> FrontMatterFormat {
        self.front_matter_format
    }

    /// The block between the delimiter lines exactly as read
    pub fn front_matter_source(&self) -> &str {
        &self.front_matter_source
    }

    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    /// Everything after the closing delimiter line
    pub fn markdown_source(&self) -> &str {
        &self.markdown_source
    }

    /// The front matter block with both delimiter lines, byte for byte.
    /// Empty when the document has no block.
    pub fn raw_header(&self) -> &str {
        &self.raw_header
    }

    pub fn has_front_matter(&self) -> bool {
        !self.raw_header.is_empty()
    }

    /// Rebuild the full document with freshly encoded front matter
    pub fn content(&self) -> Result<String> {
        let yaml = match self.front_matter_format {
            FrontMatterFormat::Yaml => self.front_matter.encode()?,
        };
        Ok(format!(
            "{DELIMITER}\n{yaml}{DELIMITER}\n{}",
            self.markdown_source
        ))
    }

    /// Rebuild the document around a new body, keeping the original block verbatim
    pub fn with_body_verbatim(&self, body: &str) -> String {
        format!("{}{}", self.raw_header, body)
    }
}
