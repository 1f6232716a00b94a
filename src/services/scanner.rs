use crate::services::pdf::SourcePdf;
use crate::types::{ScanReport, SectionRange};
use tracing::{debug, info};

pub struct PhraseScanner;

impl PhraseScanner {
    /// Single linear pass over the source's pages: collect every page whose
    /// extracted text contains the phrase (case-insensitive), then derive
    /// the section ranges. Pages with no extractable text count as
    /// non-matching.
    pub fn scan(source: &SourcePdf, phrase: &str) -> ScanReport {
        info!(
            "Scanning '{}' for \"{}\"",
            source.path().display(),
            phrase
        );

        let needle = phrase.to_lowercase();
        let page_count = source.page_count();
        let mut matches = Vec::new();

        for index in 0..page_count {
            let text = source.page_text(index);
            if !text.is_empty() && text.to_lowercase().contains(&needle) {
                debug!("Phrase found on page {}", index + 1);
                matches.push(index);
            }
        }

        let consecutive = Self::consecutive_pairs(&matches);
        let ranges = Self::compute_ranges(&matches, page_count);
        let skipped_leading_pages = matches.first().copied().unwrap_or(0);

        debug!(
            "Found {} matches across {} pages",
            matches.len(),
            page_count
        );

        ScanReport {
            source: source.path().display().to_string(),
            phrase: phrase.to_string(),
            page_count,
            matches,
            consecutive,
            ranges,
            skipped_leading_pages,
        }
    }

    /// Adjacent match pairs `(hits[k-1], hits[k])` where the second page
    /// immediately follows the first. Diagnostic only.
    pub fn consecutive_pairs(hits: &[usize]) -> Vec<(usize, usize)> {
        hits.windows(2)
            .filter(|pair| pair[1] == pair[0] + 1)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// One half-open range per match: each range runs from its match to the
    /// next match, the last one to the end of the document.
    pub fn compute_ranges(hits: &[usize], page_count: usize) -> Vec<SectionRange> {
        let mut ranges = Vec::with_capacity(hits.len());

        for (idx, &start) in hits.iter().enumerate() {
            let end = hits.get(idx + 1).copied().unwrap_or(page_count);
            ranges.push(SectionRange { start, end });
        }

        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pdf::fixtures;
    use tempfile::TempDir;

    #[test]
    fn ranges_for_two_matches_in_ten_pages() {
        let ranges = PhraseScanner::compute_ranges(&[2, 6], 10);
        assert_eq!(
            ranges,
            vec![
                SectionRange { start: 2, end: 6 },
                SectionRange { start: 6, end: 10 },
            ]
        );
        assert!(ranges.iter().all(|r| r.page_count() == 4));
    }

    #[test]
    fn consecutive_matches_yield_single_page_ranges() {
        let ranges = PhraseScanner::compute_ranges(&[0, 1, 2], 5);
        assert_eq!(
            ranges,
            vec![
                SectionRange { start: 0, end: 1 },
                SectionRange { start: 1, end: 2 },
                SectionRange { start: 2, end: 5 },
            ]
        );
    }

    #[test]
    fn no_matches_yield_no_ranges() {
        assert!(PhraseScanner::compute_ranges(&[], 5).is_empty());
    }

    #[test]
    fn single_match_spans_to_end_of_document() {
        let ranges = PhraseScanner::compute_ranges(&[4], 9);
        assert_eq!(ranges, vec![SectionRange { start: 4, end: 9 }]);
    }

    #[test]
    fn ranges_partition_from_first_match_to_page_count() {
        for (hits, page_count) in [
            (vec![2, 6], 10),
            (vec![0, 1, 2], 5),
            (vec![3], 7),
            (vec![1, 4, 5, 9], 12),
        ] {
            let ranges = PhraseScanner::compute_ranges(&hits, page_count);
            assert_eq!(ranges.len(), hits.len());
            assert_eq!(ranges[0].start, hits[0]);
            assert_eq!(ranges.last().unwrap().end, page_count);
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }

    #[test]
    fn consecutive_pairs_are_detected() {
        assert_eq!(
            PhraseScanner::consecutive_pairs(&[0, 1, 2]),
            vec![(0, 1), (1, 2)]
        );
        assert!(PhraseScanner::consecutive_pairs(&[2, 6]).is_empty());
        assert!(PhraseScanner::consecutive_pairs(&[]).is_empty());
    }

    #[test]
    fn scan_matches_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let path = fixtures::write_pdf(
            dir.path(),
            "report.pdf",
            &[
                "cover sheet",
                "INVOICE 1001 first customer",
                "details continued",
                "Invoice 1002 second customer",
            ],
        );

        let source = SourcePdf::open(&path).unwrap();
        let report = PhraseScanner::scan(&source, "invoice");

        assert_eq!(report.matches, vec![1, 3]);
        assert_eq!(report.skipped_leading_pages, 1);
        assert_eq!(
            report.ranges,
            vec![
                SectionRange { start: 1, end: 3 },
                SectionRange { start: 3, end: 4 },
            ]
        );
    }

    #[test]
    fn scan_without_matches_reports_none() {
        let dir = TempDir::new().unwrap();
        let path =
            fixtures::write_pdf(dir.path(), "plain.pdf", &["one", "two", "three"]);

        let source = SourcePdf::open(&path).unwrap();
        let report = PhraseScanner::scan(&source, "invoice");

        assert!(!report.has_matches());
        assert!(report.ranges.is_empty());
        assert_eq!(report.page_count, 3);
        assert_eq!(report.skipped_leading_pages, 0);
    }
}
