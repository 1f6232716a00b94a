use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Half-open page-index interval `[start, end)`, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRange {
    pub start: usize,
    pub end: usize,
}

impl SectionRange {
    pub fn page_count(&self) -> usize {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub source: String,
    pub phrase: String,
    pub page_count: usize,
    /// Zero-based page indices where the phrase was found, ascending.
    pub matches: Vec<usize>,
    /// Adjacent match pairs; diagnostic only, never alters the ranges.
    pub consecutive: Vec<(usize, usize)>,
    pub ranges: Vec<SectionRange>,
    /// Pages before the first match; excluded from every section.
    pub skipped_leading_pages: usize,
}

impl ScanReport {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub base_name: String,
    pub output_dir: PathBuf,
    pub auto_names: bool,
    pub force: bool,
    pub write_manifest: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionFile {
    pub ordinal: usize,
    pub name: String,
    pub path: PathBuf,
    pub range: SectionRange,
}

#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub sections: Vec<SectionFile>,
    pub manifest_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub output_file: PathBuf,
    pub total_pages: usize,
    pub sources: Vec<PathBuf>,
}
