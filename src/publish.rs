//! Article workflows built on the core
//!
//! [`Publisher`] ties an article file to its `devto.yml`, keeps the image
//! mapping up to date, and hands prepared articles to an [`ArticleSubmitter`].
//! Transport, retries and authentication belong to the submitter.

use crate::config::{ArticleConfig, Settings};
use crate::core::{prefix_links, rewrite_image_links, scan_image_links, LinkMap};
use crate::error::{DevtoError, Result};
use crate::io::DocumentReader;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What gets sent to the remote article API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub published: bool,
    /// Full document: original front matter block plus the rewritten body
    pub body_markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// The remote side of a submission
pub trait ArticleSubmitter {
    /// Create (`article_id` is `None`) or update an article and return its id
    fn submit(&mut self, article_id: Option<u64>, payload: &ArticlePayload) -> Result<u64>;
}

/// Submitter that only describes what would be sent
pub struct DryRunSubmitter<W: Write> {
    out: W,
    json: bool,
    filename: Option<PathBuf>,
    prefix: Option<String>,
}

impl<W: Write> DryRunSubmitter<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            filename: None,
            prefix: None,
        }
    }

    /// Name the article file and the prefix applied to it in the summary
    pub fn describing(mut self, filename: impl Into<PathBuf>, prefix: Option<&str>) -> Self {
        self.filename = Some(filename.into());
        self.prefix = prefix.map(str::to_string);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ArticleSubmitter for DryRunSubmitter<W> {
    fn submit(&mut self, article_id: Option<u64>, payload: &ArticlePayload) -> Result<u64> {
        writeln!(self.out, "This is a dry run. Remove --dry-run to submit to dev.to")?;
        writeln!(self.out, "---")?;
        if let Some(filename) = &self.filename {
            writeln!(self.out, "Filename: {}", filename.display())?;
        }
        match article_id {
            Some(id) => writeln!(self.out, "Article ID: {id}")?,
            None => writeln!(self.out, "Article ID: (new)")?,
        }
        writeln!(self.out, "Title: {}", payload.title.as_deref().unwrap_or(""))?;
        writeln!(self.out, "Published: {}", payload.published)?;
        if self.filename.is_some() {
            writeln!(self.out, "Prefixed: {}", self.prefix.as_deref().unwrap_or(""))?;
        }
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(payload)?)?;
        }
        Ok(article_id.unwrap_or(0))
    }
}

/// Options for a single submission
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Prefix for image targets that have no replacement yet
    pub prefix: Option<String>,
    /// Publish even if the front matter does not say so
    pub published: bool,
}

/// Article workflows for one process
#[derive(Debug, Clone, Default)]
pub struct Publisher {
    settings: Settings,
    reader: DocumentReader,
}

impl Publisher {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            reader: DocumentReader::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Path of the `devto.yml` that belongs to `article`
    pub fn config_path<P: AsRef<Path>>(&self, article: P) -> PathBuf {
        self.settings.config_path_for(article)
    }

    /// Refresh the article's image mapping and save it.
    ///
    /// Targets found in the article are added with an empty value; values
    /// already in the config are kept. With a prefix, empty values are filled
    /// with `prefix + target`, or every value is replaced when `force` is set.
    /// `force` needs a prefix, from the argument or from [`Settings`].
    pub fn generate<P: AsRef<Path>>(
        &self,
        article: P,
        prefix: Option<&str>,
        force: bool,
    ) -> Result<ArticleConfig> {
        let article = article.as_ref();
        let prefix = self.effective_prefix(prefix);
        if force && prefix.is_none() {
            return Err(DevtoError::validation(
                "--force needs a prefix, from -p or DEVTO_PREFIX",
            ));
        }
        let config_path = self.config_path(article);
        let mut config = ArticleConfig::load(&config_path)?;

        let scanned = self.reader.image_links(article)?;
        let stale: Vec<&str> = config
            .images
            .keys()
            .filter(|target| !scanned.contains_key(target))
            .collect();
        if !stale.is_empty() {
            debug!("Keeping {} targets no longer in {}: {:?}", stale.len(), article.display(), stale);
        }

        config.images.merge_missing(&scanned);
        if let Some(prefix) = prefix {
            config.images = prefix_links(config.images, prefix, force);
        }

        config.save(&config_path)?;
        info!(
            "Wrote {} image links to {}",
            config.images.len(),
            config_path.display()
        );
        Ok(config)
    }

    /// Build the payload for `article` without submitting it
    pub fn prepare<P: AsRef<Path>>(
        &self,
        article: P,
        options: &SubmitOptions,
    ) -> Result<(ArticleConfig, ArticlePayload)> {
        let article = article.as_ref();
        let config = ArticleConfig::load(self.config_path(article))?;
        let document = self.reader.read_file(article)?;

        let links = self.resolve_links(&config.images, document.markdown_source(), options);
        let body = rewrite_image_links(document.markdown_source(), &links);

        let front_matter = document.front_matter();
        let payload = ArticlePayload {
            title: front_matter.title.clone(),
            published: options.published || front_matter.published,
            body_markdown: document.with_body_verbatim(&body),
            description: front_matter.description.clone(),
            tags: front_matter.tags.clone(),
        };
        Ok((config, payload))
    }

    /// Prepare `article`, hand it to `submitter`, and record a new remote id
    pub fn submit<P, S>(&self, article: P, options: &SubmitOptions, submitter: &mut S) -> Result<u64>
    where
        P: AsRef<Path>,
        S: ArticleSubmitter + ?Sized,
    {
        let article = article.as_ref();
        let (mut config, payload) = self.prepare(article, options)?;

        let previous = config.remote_id();
        let id = submitter.submit(previous, &payload)?;

        if id != 0 && Some(id) != previous {
            config.article_id = id;
            let config_path = self.config_path(article);
            config.save(&config_path)?;
            info!("Recorded article id {} in {}", id, config_path.display());
        }
        Ok(id)
    }

    /// Config links, plus any new targets, with the prefix filling the gaps
    fn resolve_links(&self, configured: &LinkMap, body: &str, options: &SubmitOptions) -> LinkMap {
        let mut links = configured.clone();
        links.merge_missing(&scan_image_links(body));
        match self.effective_prefix(options.prefix.as_deref()) {
            Some(prefix) => prefix_links(links, prefix, false),
            None => links,
        }
    }

    /// `prefix` if given, else the settings prefix; empty means none
    pub fn effective_prefix<'a>(&'a self, prefix: Option<&'a str>) -> Option<&'a str> {
        prefix
            .or(self.settings.prefix.as_deref())
            .filter(|p| !p.is_empty())
    }
}
