use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-split")]
#[command(about = "A CLI tool for splitting PDF documents at phrase matches and merging the results")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output directory for section and merged files
    #[arg(short, long, global = true, default_value = "./output")]
    pub output: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a PDF into sections at phrase matches
    Split(SplitArgs),

    /// Report phrase matches and section ranges without writing files
    Scan(ScanArgs),

    /// Merge PDFs from the output directory into one document
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct SplitArgs {
    /// Source PDF file
    #[arg(required = true, value_name = "SOURCE")]
    pub source: PathBuf,

    /// Phrase to split at, matched case-insensitively against page text
    #[arg(required = true, value_name = "PHRASE")]
    pub phrase: String,

    /// Base name for section files (e.g. 'CR' yields CR_1.pdf, CR_2.pdf)
    #[arg(short, long, default_value = "section")]
    pub base_name: String,

    /// Use generated names without prompting per section
    #[arg(long)]
    pub auto_names: bool,

    /// Write a JSON manifest describing the run
    #[arg(long)]
    pub manifest: bool,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Source PDF file
    #[arg(required = true, value_name = "SOURCE")]
    pub source: PathBuf,

    /// Phrase to scan for, matched case-insensitively against page text
    #[arg(required = true, value_name = "PHRASE")]
    pub phrase: String,

    /// Output scan report to JSON file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// Show per-page match information
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Comma-separated 1-based file numbers to merge (e.g. "1,3,5"); prompted if omitted
    #[arg(short, long, value_name = "LIST")]
    pub select: Option<String>,

    /// Name for the merged file, without extension; prompted if omitted
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,
}
