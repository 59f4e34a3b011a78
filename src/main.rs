mod cli_bin;

use anyhow::Result;
use clap::Parser;
use cli_bin::args::{Cli, Commands};
use cli_bin::commands;
use devto::{Publisher, Settings};
use log::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let settings = Settings::resolve(|key| std::env::var(key).ok());
    let publisher = Publisher::new(settings);

    match cli.command {
        Commands::Generate(args) => commands::generate_command(&publisher, args)?,
        Commands::Submit(args) => commands::submit_command(&publisher, args)?,
        Commands::Render(args) => commands::render_command(&publisher, args)?,
        Commands::Links(args) => commands::links_command(args)?,
        Commands::Fmt(args) => commands::fmt_command(args)?,
    }
    Ok(())
}
