//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser, Debug)]
#[command(
    name = "devto",
    version,
    about = "A tool to help you publish to dev.to from your terminal",
    long_about = "devto reads a markdown article with YAML front matter, keeps a devto.yml \
                  image mapping next to it, and rewrites image links before the article \
                  is submitted."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print debug log on stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate or refresh the devto.yml config for a markdown file
    ///
    /// devto.yml is created next to <FILE> and has the following format:
    ///
    ///   article_id: 1234
    ///   images:
    ///     "./image-1.png": "./new-image-1.png"
    ///     "./image-2.png": ""
    ///
    /// Image links already in devto.yml keep their values; new ones are added with "".
    #[command(verbatim_doc_comment)]
    Generate(GenerateArgs),
    /// Submit an article to dev.to
    ///
    /// All image links in <FILE> are replaced according to the images mapping in
    /// devto.yml. If the value of a key is an empty string, it is not replaced:
    ///
    ///   ![](./image-1.png) --> ![](./new-image-1.png)
    ///   ![](./image-2.png) --> ![](./image-2.png)
    #[command(verbatim_doc_comment)]
    Submit(SubmitArgs),
    /// Print the article with image links rewritten
    Render(RenderArgs),
    /// List the image links found in a markdown file
    Links(LinksArgs),
    /// Re-encode the front matter block
    Fmt(FmtArgs),
}

/// Image prefix option shared by commands that rewrite links
#[derive(Args, Debug, Clone, Default)]
pub struct PrefixOptions {
    /// Prefix image links with the given value
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Markdown file
    pub file: PathBuf,

    #[command(flatten)]
    pub prefix: PrefixOptions,

    /// Use with -p (or DEVTO_PREFIX) to override existing values in the devto.yml file
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the submit command
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Markdown file
    pub file: PathBuf,

    #[command(flatten)]
    pub prefix: PrefixOptions,

    /// Publish article with this flag. Front matter in markdown takes precedence
    #[arg(long)]
    pub published: bool,

    /// Print information instead of submitting to dev.to
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, also print the JSON payload
    #[arg(long, requires = "dry_run")]
    pub json: bool,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Markdown file
    pub file: PathBuf,

    #[command(flatten)]
    pub prefix: PrefixOptions,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the links command
#[derive(Args, Debug)]
pub struct LinksArgs {
    /// Markdown file
    pub file: PathBuf,
}

/// Arguments for the fmt command
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Markdown files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output formatted content to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,
}
