use anyhow::{Context, Result};
use book::{BuildContext, Metadata};
use cli::Cli;
use indicatif::{ProgressBar, ProgressStyle};
use markdown::BreakStyle;
use sinks::EPUB;
use std::process::ExitCode;

mod book;
mod cjk;
mod cli;
mod config;
mod discovery;
mod markdown;
mod sinks;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    init_logging();
    let defaults = config::load(&config::candidate_paths());
    if cli.verbose(&defaults) && std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let root = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    let metadata = Metadata::resolve(&root, &cli.overrides(&defaults))
        .with_context(|| "Failed to resolve book metadata")?;

    let breaks = BreakStyle::from_line_breaks(defaults.line_breaks());
    let mut context = BuildContext::new(&root, metadata, breaks);
    discovery::discover(&mut context)
        .with_context(|| format!("Failed to discover chapters in {}", root.display()))?;
    if context.chapters.is_empty() {
        log::warn!("No Markdown chapters found in {}", root.display());
    }

    let epub = EPUB::for_title(&root, &context.metadata.title);
    let progress = ProgressBar::new(context.chapters.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );
    progress.set_message("Rendering EPUB...");

    let stats = epub
        .render(&context, &progress)
        .with_context(|| "Failed to render EPUB")?;

    let size = byte_unit::Byte::from_u64(stats.total_bytes)
        .get_appropriate_unit(byte_unit::UnitType::Binary);
    println!();
    println!(
        "  EPUB: {} ({size:.1}, {} chapters, {} images)",
        epub.outfile.display(),
        stats.chapter_count,
        stats.image_count
    );

    Ok(())
}

/// Install the logger. Only this crate logs below warning level; the global
/// maximum starts at info and `RUST_LOG` replaces both.
fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug)
        .parse_default_env()
        .format_timestamp(None)
        .init();
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(log::LevelFilter::Info);
    }
}
