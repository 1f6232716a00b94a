use crate::error::{PdfSplitError, Result};
use crate::services::pdf;
use crate::types::MergeOutcome;
use lopdf::Document;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub struct DocumentMerger;

impl DocumentMerger {
    /// PDF files directly in the output directory, sorted by name so the
    /// numbered candidate list is stable across runs. Not limited to files
    /// written in this session.
    pub async fn discover_candidates(output_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(output_dir).await.map_err(|e| {
            PdfSplitError::OutputDirectory {
                reason: format!("Cannot read {}: {}", output_dir.display(), e),
            }
        })?;

        let mut candidates = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_pdf = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if is_pdf && entry.file_type().await?.is_file() {
                candidates.push(path);
            }
        }

        candidates.sort();
        debug!(
            "Found {} merge candidates in {}",
            candidates.len(),
            output_dir.display()
        );
        Ok(candidates)
    }

    /// Parse a comma-separated list of 1-based indices into zero-based
    /// positions. Tokens that are not a non-negative integer and indices
    /// outside `[1, candidate_count]` are silently dropped; order and
    /// repeats are preserved.
    pub fn parse_selection(input: &str, candidate_count: usize) -> Vec<usize> {
        input
            .split(',')
            .filter_map(|token| token.trim().parse::<usize>().ok())
            .filter(|&index| index >= 1 && index <= candidate_count)
            .map(|index| index - 1)
            .collect()
    }

    /// Open each selected candidate in selection order, concatenate all
    /// pages in memory, then write the merged document once. Any failure
    /// fails the whole merge with its cause.
    pub async fn merge(
        candidates: &[PathBuf],
        selection: &[usize],
        output_path: &Path,
    ) -> Result<MergeOutcome> {
        if selection.is_empty() {
            return Err(PdfSplitError::Merge {
                reason: "selection matched no candidate files".to_string(),
            });
        }

        let mut sources = Vec::with_capacity(selection.len());
        let mut documents = Vec::with_capacity(selection.len());

        for &index in selection {
            let path = candidates.get(index).ok_or_else(|| PdfSplitError::Merge {
                reason: format!("selection index {} is out of range", index + 1),
            })?;

            info!("Reading {}", path.display());
            let document = Document::load(path).map_err(|e| PdfSplitError::Merge {
                reason: format!("Failed to open {}: {}", path.display(), e),
            })?;

            sources.push(path.clone());
            documents.push(document);
        }

        let mut merged = pdf::concatenate(documents)?;
        let total_pages = pdf::page_count_of(&merged);

        merged.save(output_path).map_err(|e| PdfSplitError::Merge {
            reason: format!("Failed to write {}: {}", output_path.display(), e),
        })?;

        info!(
            "Merged {} pages from {} files into {}",
            total_pages,
            sources.len(),
            output_path.display()
        );

        Ok(MergeOutcome {
            output_file: output_path.to_path_buf(),
            total_pages,
            sources,
        })
    }
}
