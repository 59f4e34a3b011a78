//! Per-article config and process settings
//!
//! [`ArticleConfig`] is the `devto.yml` file kept next to an article. It
//! records the remote article id and the curated image link replacements:
//!
//! ```yaml
//! article_id: 1234
//! images:
//!   "./image-1.png": "./new-image-1.png"
//!   "./image-2.png": ""
//! ```
//!
//! [`Settings`] is built once at startup and handed to the workflow layer.

use crate::core::LinkMap;
use crate::error::{DevtoError, Result};
use crate::io::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the per-article config file
pub const DEFAULT_CONFIG_FILE: &str = "devto.yml";

/// Environment variable overriding [`Settings::config_file_name`]
pub const ENV_CONFIG_FILE: &str = "DEVTO_CONFIG_FILE";

/// Environment variable supplying a default image link prefix
pub const ENV_PREFIX: &str = "DEVTO_PREFIX";

/// Contents of `devto.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleConfig {
    /// Remote article id; 0 means the article has not been created yet
    #[serde(default)]
    pub article_id: u64,
    /// Image target replacements, see [`LinkMap`] for the empty-value rule
    #[serde(default)]
    pub images: LinkMap,
}

impl ArticleConfig {
    /// Load a config file. A missing file yields the default config.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(DevtoError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| DevtoError::invalid_config(path, e.to_string()))
    }

    /// Write the config atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        write_atomic(path, &yaml)
    }

    /// The remote id, or `None` while the article is unpublished
    pub fn remote_id(&self) -> Option<u64> {
        (self.article_id != 0).then_some(self.article_id)
    }
}

/// Process-wide settings, resolved once from flags and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// File name of the per-article config, looked up next to the article
    pub config_file_name: String,
    /// Prefix applied to unmapped image links when none is given per command
    pub prefix: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file_name: DEFAULT_CONFIG_FILE.to_string(),
            prefix: None,
        }
    }
}

impl Settings {
    /// Layer settings: `env` first, then defaults. Per-command flags such as
    /// `-p` are applied later by [`crate::Publisher`].
    ///
    /// `env` is a lookup function so callers decide where variables come from.
    pub fn resolve<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |value: String| (!value.is_empty()).then_some(value);

        let config_file_name = env(ENV_CONFIG_FILE)
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        let prefix = env(ENV_PREFIX).and_then(non_empty);

        Self {
            config_file_name,
            prefix,
        }
    }

    /// Location of the config file belonging to `article`
    pub fn config_path_for<P: AsRef<Path>>(&self, article: P) -> PathBuf {
        let dir = article.as_ref().parent().unwrap_or_else(|| Path::new(""));
        dir.join(&self.config_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = ArticleConfig::load(temp_dir.path().join("devto.yml")).unwrap();
        assert_eq!(config, ArticleConfig::default());
        assert_eq!(config.remote_id(), None);
    }

    #[test]
    fn test_load_keeps_image_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devto.yml");
        fs::write(
            &path,
            "article_id: 1234\nimages:\n  \"./image-1.png\": \"./new-image-1.png\"\n  \"./image-2.png\": \"\"\n",
        )
        .unwrap();

        let config = ArticleConfig::load(&path).unwrap();
        assert_eq!(config.remote_id(), Some(1234));
        assert_eq!(
            config.images.iter().collect::<Vec<_>>(),
            vec![("./image-1.png", "./new-image-1.png"), ("./image-2.png", "")]
        );
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devto.yml");
        let config = ArticleConfig {
            article_id: 7,
            images: [("b.png", ""), ("a.png", "https://cdn/a.png")]
                .into_iter()
                .collect(),
        };

        config.save(&path).unwrap();
        assert_eq!(ArticleConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devto.yml");
        fs::write(&path, "article_id: not-a-number\n").unwrap();

        let err = ArticleConfig::load(&path).unwrap_err();
        assert!(matches!(err, DevtoError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_null_images() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devto.yml");
        fs::write(&path, "article_id: 3\nimages:\n").unwrap();

        let config = ArticleConfig::load(&path).unwrap();
        assert!(config.images.is_empty());
    }

    #[test]
    fn test_settings_layering() {
        let env: HashMap<&str, &str> = [(ENV_PREFIX, "https://env/"), (ENV_CONFIG_FILE, "blog.yml")]
            .into_iter()
            .collect();
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let from_env = Settings::resolve(lookup);
        assert_eq!(from_env.prefix.as_deref(), Some("https://env/"));
        assert_eq!(from_env.config_file_name, "blog.yml");
    }

    #[test]
    fn test_settings_defaults() {
        assert_eq!(Settings::resolve(|_| None), Settings::default());

        let empty = Settings::resolve(|_| Some(String::new()));
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn test_config_path_for() {
        let settings = Settings::default();
        assert_eq!(
            settings.config_path_for("posts/hello/article.md"),
            PathBuf::from("posts/hello/devto.yml")
        );
        assert_eq!(settings.config_path_for("article.md"), PathBuf::from("devto.yml"));
    }
}
