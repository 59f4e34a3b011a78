//! Front matter block detection, decoding and encoding
//!
//! A front matter block is delimited by two lines consisting solely of `---`.
//! The opening line must be the first line of the document.

use crate::error::{DevtoError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Line that opens and closes a front matter block
pub const DELIMITER: &str = "---";

/// Serialization dialect of a front matter block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontMatterFormat {
    /// `key: value` YAML mapping between `---` lines
    #[default]
    Yaml,
}

/// The article metadata dev.to understands
///
/// Unknown keys are ignored when decoding and are not written back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "bool_or_null")]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form comma separated text, kept as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl FrontMatter {
    /// Decode a raw block, naming `path` in any error
    pub fn decode(source: &str, path: &Path) -> Result<Self> {
        // An empty or comment-only block is a null document, not a mapping.
        let probe: serde_yaml::Value = serde_yaml::from_str(source)
            .map_err(|e| DevtoError::invalid_front_matter(path, e.to_string()))?;
        if probe.is_null() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(source)
            .map_err(|e| DevtoError::invalid_front_matter(path, e.to_string()))
    }

    /// Encode as a YAML block body, ending with a newline
    pub fn encode(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(yaml.trim_start_matches("---\n").to_string())
    }
}

/// `published:` with no value reads as `false`
fn bool_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Byte layout of a document split at its front matter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Split<'a> {
    /// Everything up to the start of the body, both delimiter lines included
    pub header: &'a str,
    /// Text strictly between the delimiter lines
    pub source: &'a str,
    /// Everything after the closing delimiter line
    pub body: &'a str,
}

/// Locate the front matter block, if the document has a complete one
pub(crate) fn split(content: &str) -> Option<Split<'_>> {
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if !is_delimiter(first) {
        return None;
    }

    let source_start = first.len();
    let mut offset = source_start;
    for line in lines {
        if is_delimiter(line) {
            let body_start = offset + line.len();
            return Some(Split {
                header: &content[..body_start],
                source: &content[source_start..offset],
                body: &content[body_start..],
            });
        }
        offset += line.len();
    }

    None
}

fn is_delimiter(line: &str) -> bool {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line == DELIMITER
}
