//! Atomic file writing
//!
//! Content goes to a temporary file in the target's directory, which is then
//! renamed over the target, so readers never observe a half-written file.

use crate::error::{DevtoError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `content` to `path` atomically, creating parent directories
pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        DevtoError::Io(std::io::Error::other(format!(
            "Failed to persist temporary file to {}: {}",
            path.display(),
            e
        )))
    })?;

    Ok(())
}
