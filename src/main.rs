mod cli;
mod error;
mod prompt;
mod services;
mod types;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, MergeArgs, ScanArgs, SplitArgs};
use error::{PdfSplitError, Result};
use prompt::{PromptSource, StdinPrompt};
use services::{DocumentMerger, PhraseScanner, SectionSplitter, SourcePdf};
use std::path::PathBuf;
use tracing::{error, info, warn, Level};
use tracing_subscriber;
use types::SplitConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Split(args) => handle_split_command(args, &cli.output).await,
        Commands::Scan(args) => handle_scan_command(args).await,
        Commands::Merge(args) => handle_merge_command(args, &cli.output).await,
    };

    if let Err(e) = result {
        error!("Operation failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_split_command(args: &SplitArgs, output_dir: &PathBuf) -> Result<()> {
    info!(
        "Splitting '{}' at \"{}\"",
        args.source.display(),
        args.phrase
    );

    let source = SourcePdf::open(&args.source)?;
    info!("Loaded {} pages", source.page_count());

    let report = PhraseScanner::scan(&source, &args.phrase);

    for page in &report.matches {
        info!("Phrase found on page {}", page + 1);
    }
    for (first, second) in &report.consecutive {
        info!(
            "Consecutive matches found on pages {} and {}",
            first + 1,
            second + 1
        );
    }

    if !report.has_matches() {
        warn!("No matches found.");
        return Ok(());
    }

    if report.skipped_leading_pages > 0 {
        warn!(
            "Pages 1-{} precede the first match and will not be written",
            report.skipped_leading_pages
        );
    }

    // Print section preview
    for (idx, range) in report.ranges.iter().enumerate() {
        info!(
            "  Section {}: pages {}-{} ({} pages)",
            idx + 1,
            range.start + 1,
            range.end,
            range.page_count()
        );
    }

    let config = SplitConfig {
        base_name: args.base_name.clone(),
        output_dir: output_dir.clone(),
        auto_names: args.auto_names,
        force: args.force,
        write_manifest: args.manifest,
    };

    let mut prompts = StdinPrompt;
    let outcome = SectionSplitter::split_document(&source, &report, &config, &mut prompts).await?;

    info!(
        "Successfully created {} section files for '{}':",
        outcome.sections.len(),
        args.source.display()
    );
    for section in &outcome.sections {
        info!("  - {}", section.path.display());
    }
    if let Some(manifest_file) = &outcome.manifest_file {
        info!("  - {} (manifest)", manifest_file.display());
    }

    Ok(())
}

async fn handle_scan_command(args: &ScanArgs) -> Result<()> {
    info!("Scanning: {}", args.source.display());

    let source = SourcePdf::open(&args.source)?;
    let report = PhraseScanner::scan(&source, &args.phrase);

    // Print report to console
    println!("\n=== Scan report for '{}' ===", args.source.display());
    println!("Total pages: {}", report.page_count);
    println!("Matches: {}", report.matches.len());
    for page in &report.matches {
        println!("  Phrase found on page {}", page + 1);
    }
    for (first, second) in &report.consecutive {
        println!(
            "  Consecutive matches on pages {} and {}",
            first + 1,
            second + 1
        );
    }

    if report.matches.is_empty() {
        println!("No matches found.");
    } else {
        if report.skipped_leading_pages > 0 {
            println!(
                "Pages 1-{} precede the first match and would be dropped",
                report.skipped_leading_pages
            );
        }
        println!("\nSections:");
        for (idx, range) in report.ranges.iter().enumerate() {
            println!(
                "  Section {}: pages {}-{} ({} pages)",
                idx + 1,
                range.start + 1,
                range.end,
                range.page_count()
            );
        }
    }

    if args.detailed {
        println!("\nPage details:");
        for index in 0..report.page_count {
            let text = source.page_text(index);
            let marker = if report.matches.contains(&index) {
                " [match]"
            } else {
                ""
            };
            println!(
                "  Page {}: {} chars{}",
                index + 1,
                text.chars().count(),
                marker
            );
        }
    }

    // Write JSON output if requested
    if let Some(json_path) = &args.json_output {
        let json_content = serde_json::to_string_pretty(&report)
            .context("Failed to serialize scan report")?;

        tokio::fs::write(json_path, json_content)
            .await
            .context("Failed to write scan report file")?;

        info!("Scan report written to: {}", json_path.display());
    }

    Ok(())
}

async fn handle_merge_command(args: &MergeArgs, output_dir: &PathBuf) -> Result<()> {
    let candidates = DocumentMerger::discover_candidates(output_dir).await?;
    if candidates.is_empty() {
        warn!("No PDF files found in {}", output_dir.display());
        return Ok(());
    }

    println!("PDFs in {}:", output_dir.display());
    for (idx, path) in candidates.iter().enumerate() {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("(unreadable name)");
        println!("  {}. {}", idx + 1, name);
    }

    let mut prompts = StdinPrompt;
    let selection_input = match &args.select {
        Some(list) => list.clone(),
        None => prompts.ask(
            "Enter the numbers of the files to merge, separated by commas (e.g. 1,3,5): ",
        )?,
    };

    let selection = DocumentMerger::parse_selection(&selection_input, candidates.len());
    if selection.is_empty() {
        warn!("Selection matched no files.");
        return Ok(());
    }

    let merged_name = match &args.name {
        Some(name) => name.clone(),
        None => prompts.ask("Enter a name for the merged PDF (no extension): ")?,
    };
    let merged_name = merged_name.trim();
    if merged_name.is_empty() {
        return Err(PdfSplitError::Merge {
            reason: "merged output name is empty".to_string(),
        });
    }

    let output_path = output_dir.join(format!("{}.pdf", merged_name));
    let outcome = DocumentMerger::merge(&candidates, &selection, &output_path).await?;

    info!(
        "Merged {} pages from {} files",
        outcome.total_pages,
        outcome.sources.len()
    );
    info!("Merged PDF saved as: {}", outcome.output_file.display());

    Ok(())
}
