use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitemapper_crawler::Crawler;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

/// Expand `~` in a user-supplied output path
pub fn resolve_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Number of lines (pages, static resources and diagnostics) in a site map
pub fn entry_count(site_map: &str) -> usize {
    site_map.lines().count()
}

/// Write the site map text to a file, creating parent directories as needed
pub fn write_site_map(path: &Path, site_map: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, site_map).with_context(|| format!("Failed to write {}", path.display()))
}

fn print_divider() {
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
}

pub async fn handle_map(args: &ArgMatches, quiet: bool) -> Result<()> {
    // crawl progress goes to stderr so a piped site map stays clean
    let max_level = if quiet { Level::WARN } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    let base_url = args.get_one::<String>("URL").unwrap();
    let depth = *args.get_one::<usize>("depth").unwrap();
    let timeout_ms = *args.get_one::<u64>("timeout").unwrap();
    let output = args.get_one::<String>("output").map(|raw| resolve_output_path(raw));

    if !quiet {
        print_divider();
        eprintln!("{}", "  SITEMAPPER".bright_white().bold());
        print_divider();
        eprintln!("{} Base URL: {}", "→".blue(), base_url.bright_white());
        eprintln!(
            "{} Max depth: {}",
            "→".blue(),
            depth.to_string().bright_white()
        );
        eprintln!(
            "{} Timeout: {} ms",
            "→".blue(),
            timeout_ms.to_string().bright_white()
        );
        match &output {
            Some(path) => eprintln!(
                "{} Output: {}",
                "→".blue(),
                path.display().to_string().bright_white()
            ),
            None => eprintln!("{} Output: {}", "→".blue(), "stdout".bright_white()),
        }
        print_divider();
    }

    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Crawling {base_url}..."));
        Some(pb)
    };

    let crawler = Crawler::new(timeout_ms).with_max_depth(depth);
    let result = crawler.create_site_map(base_url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let site_map = result.context("Crawl failed")?;

    match output {
        Some(path) => {
            write_site_map(&path, &site_map)?;
            if !quiet {
                eprintln!(
                    "{} Site map saved to: {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
                eprintln!(
                    "{} {} entries",
                    "✓".green().bold(),
                    entry_count(&site_map).to_string().cyan()
                );
            }
        }
        None => print!("{site_map}"),
    }

    Ok(())
}
