//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use devto::error::{DevtoError, Result};
use devto::{
    write_atomic, DocumentReader, DryRunSubmitter, ParsedDocument, Publisher, SubmitOptions,
};
use log::{debug, info};
use std::io;

/// Execute the generate command
pub fn generate_command(publisher: &Publisher, args: GenerateArgs) -> Result<()> {
    debug!("Executing generate command with args: {:?}", args);

    let config = publisher.generate(&args.file, args.prefix.prefix.as_deref(), args.force)?;
    if config.images.is_empty() {
        info!("No image links found in {}", args.file.display());
    }
    Ok(())
}

/// Execute the submit command
pub fn submit_command(publisher: &Publisher, args: SubmitArgs) -> Result<()> {
    debug!("Executing submit command with args: {:?}", args);

    if !args.dry_run {
        return Err(DevtoError::not_supported(
            "submitting to dev.to from this build; use --dry-run",
        ));
    }

    let prefix = publisher
        .effective_prefix(args.prefix.prefix.as_deref())
        .map(str::to_string);
    let mut submitter = DryRunSubmitter::new(io::stdout().lock(), args.json)
        .describing(&args.file, prefix.as_deref());
    let options = SubmitOptions {
        prefix: args.prefix.prefix,
        published: args.published,
    };
    publisher.submit(&args.file, &options, &mut submitter)?;
    Ok(())
}

/// Execute the render command
pub fn render_command(publisher: &Publisher, args: RenderArgs) -> Result<()> {
    debug!("Executing render command with args: {:?}", args);

    let options = SubmitOptions {
        prefix: args.prefix.prefix,
        published: false,
    };
    let (_, payload) = publisher.prepare(&args.file, &options)?;

    match &args.output {
        Some(output) => {
            write_atomic(output, &payload.body_markdown)?;
            info!("Wrote {}", output.display());
        }
        None => print!("{}", payload.body_markdown),
    }
    Ok(())
}

/// Execute the links command
pub fn links_command(args: LinksArgs) -> Result<()> {
    debug!("Executing links command with args: {:?}", args);

    let links = DocumentReader::new().image_links(&args.file)?;
    if links.is_empty() {
        info!("No image links found in {}", args.file.display());
        return Ok(());
    }
    print!("{}", serde_yaml::to_string(&links)?);
    Ok(())
}

/// Execute the fmt command
pub fn fmt_command(args: FmtArgs) -> Result<()> {
    debug!("Executing fmt command with args: {:?}", args);

    let reader = DocumentReader::new();
    let mut processed_count = 0;

    for file in &args.files {
        debug!("Processing file: {}", file.display());

        let original = reader.read_to_string(file)?;
        let document = ParsedDocument::parse(&original, file)?;
        if !document.has_front_matter() {
            debug!("No front matter in {}, skipping", file.display());
            continue;
        }
        let formatted = document.content()?;

        if args.stdout {
            print!("{}", formatted);
        } else if formatted != original {
            write_atomic(file, &formatted)?;
            processed_count += 1;
            info!("Formatted: {}", file.display());
        }
    }

    info!("Processed {} files", processed_count);
    Ok(())
}
