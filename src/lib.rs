//! # PDF Splitter Library
//!
//! A library for splitting PDF documents into sections at phrase matches and
//! merging previously written sections back into one document. Every page
//! whose extracted text contains the phrase (case-insensitively) starts a new
//! section; the last section runs to the end of the document.
//!
//! ## Example Usage
//!
//! ```no_run
//! use pdf_splitter::{PhraseScanner, ScriptedPrompt, SectionSplitter, SourcePdf, SplitConfig};
//! use std::path::{Path, PathBuf};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load the source document
//!     let source = SourcePdf::open(Path::new("document.pdf"))?;
//!
//!     // Find phrase matches and derive section ranges
//!     let report = PhraseScanner::scan(&source, "chapter");
//!
//!     // Configure splitting
//!     let config = SplitConfig {
//!         base_name: "CR".to_string(),
//!         output_dir: PathBuf::from("./output"),
//!         auto_names: true,
//!         force: false,
//!         write_manifest: true,
//!     };
//!
//!     // Materialize one PDF per section
//!     let mut prompts = ScriptedPrompt::empty();
//!     let outcome = SectionSplitter::split_document(&source, &report, &config, &mut prompts).await?;
//!
//!     println!("Created {} section files", outcome.sections.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod prompt;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{PdfSplitError, Result};
pub use prompt::{PromptSource, ScriptedPrompt, StdinPrompt};
pub use services::{DocumentMerger, PhraseScanner, SectionSplitter, SourcePdf};
pub use types::{
    MergeOutcome, ScanReport, SectionFile, SectionRange, SplitConfig, SplitOutcome,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pdf::fixtures;
    use tempfile::TempDir;

    fn ten_page_source(dir: &TempDir) -> SourcePdf {
        // "INVOICE" on pages 3 and 7 (zero-based 2 and 6).
        let path = fixtures::write_pdf(
            dir.path(),
            "source.pdf",
            &[
                "cover",
                "table of contents",
                "INVOICE 1001",
                "1001 line items",
                "1001 totals",
                "1001 notes",
                "INVOICE 1002",
                "1002 line items",
                "1002 totals",
                "1002 notes",
            ],
        );
        SourcePdf::open(&path).unwrap()
    }

    #[tokio::test]
    async fn split_then_reassemble_covers_the_span_from_the_first_match() {
        let dir = TempDir::new().unwrap();
        let source = ten_page_source(&dir);

        let report = PhraseScanner::scan(&source, "INVOICE 10");
        assert_eq!(report.matches, vec![2, 6]);
        assert_eq!(
            report.ranges,
            vec![
                SectionRange { start: 2, end: 6 },
                SectionRange { start: 6, end: 10 },
            ]
        );

        let out_dir = dir.path().join("sections");
        let config = SplitConfig {
            base_name: "CR".to_string(),
            output_dir: out_dir.clone(),
            auto_names: true,
            force: false,
            write_manifest: false,
        };

        let mut prompts = ScriptedPrompt::empty();
        let outcome = SectionSplitter::split_document(&source, &report, &config, &mut prompts)
            .await
            .unwrap();
        assert_eq!(outcome.sections.len(), 2);

        // Both sections are 4 pages, and concatenating them in ordinal
        // order reproduces pages 3..=10 of the source with nothing
        // duplicated or dropped.
        let mut reassembled_texts = Vec::new();
        for section in &outcome.sections {
            let section_pdf = SourcePdf::open(&section.path).unwrap();
            assert_eq!(section_pdf.page_count(), 4);
            for index in 0..section_pdf.page_count() {
                reassembled_texts.push(section_pdf.page_text(index));
            }
        }
        assert_eq!(reassembled_texts.len(), 8);
        for (offset, text) in reassembled_texts.iter().enumerate() {
            let source_text = source.page_text(2 + offset);
            assert_eq!(text.trim(), source_text.trim());
        }
    }

    #[tokio::test]
    async fn no_match_run_produces_no_files() {
        let dir = TempDir::new().unwrap();
        let path = fixtures::write_pdf(
            dir.path(),
            "plain.pdf",
            &["one", "two", "three", "four", "five"],
        );
        let source = SourcePdf::open(&path).unwrap();

        let report = PhraseScanner::scan(&source, "invoice");
        assert!(!report.has_matches());

        // The CLI stops before splitting; splitting an empty report would
        // also write nothing.
        let config = SplitConfig {
            base_name: "CR".to_string(),
            output_dir: dir.path().join("sections"),
            auto_names: true,
            force: false,
            write_manifest: false,
        };
        let mut prompts = ScriptedPrompt::empty();
        let outcome = SectionSplitter::split_document(&source, &report, &config, &mut prompts)
            .await
            .unwrap();
        assert!(outcome.sections.is_empty());
    }

    #[tokio::test]
    async fn split_outputs_merge_back_in_selected_order() {
        let dir = TempDir::new().unwrap();
        let source = ten_page_source(&dir);
        let report = PhraseScanner::scan(&source, "INVOICE 10");

        let out_dir = dir.path().join("sections");
        let config = SplitConfig {
            base_name: "CR".to_string(),
            output_dir: out_dir.clone(),
            auto_names: true,
            force: false,
            write_manifest: false,
        };
        let mut prompts = ScriptedPrompt::empty();
        SectionSplitter::split_document(&source, &report, &config, &mut prompts)
            .await
            .unwrap();

        let candidates = DocumentMerger::discover_candidates(&out_dir).await.unwrap();
        assert_eq!(candidates.len(), 2);

        // Reverse order: section 2 first, then section 1.
        let selection = DocumentMerger::parse_selection("2,1", candidates.len());
        let output_path = out_dir.join("reassembled.pdf");
        let outcome = DocumentMerger::merge(&candidates, &selection, &output_path)
            .await
            .unwrap();

        assert_eq!(outcome.total_pages, 8);
        let merged = SourcePdf::open(&output_path).unwrap();
        assert!(merged.page_text(0).contains("INVOICE 1002"));
        assert!(merged.page_text(4).contains("INVOICE 1001"));
    }
}
