use crate::error::{PdfSplitError, Result};
use crate::prompt::PromptSource;
use crate::services::pdf::SourcePdf;
use crate::types::{ScanReport, SectionFile, SplitConfig, SplitOutcome};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

pub struct SectionSplitter;

impl SectionSplitter {
    /// Materialize one output PDF per range in the scan report. Section
    /// names come from the prompt source unless `auto_names` is set; an
    /// empty answer falls back to `{base_name}_{ordinal}`.
    pub async fn split_document(
        source: &SourcePdf,
        report: &ScanReport,
        config: &SplitConfig,
        prompts: &mut dyn PromptSource,
    ) -> Result<SplitOutcome> {
        info!(
            "Splitting '{}' into {} sections",
            source.path().display(),
            report.ranges.len()
        );

        Self::ensure_output_directory(&config.output_dir).await?;

        let mut sections: Vec<SectionFile> = Vec::new();

        for (idx, range) in report.ranges.iter().enumerate() {
            let ordinal = idx + 1;
            let name = Self::resolve_section_name(config, ordinal, prompts)?;

            if sections.iter().any(|s| s.name == name) {
                return Err(PdfSplitError::NameCollision { name });
            }

            let output_path = config.output_dir.join(format!("{}.pdf", name));
            if output_path.exists() && !config.force {
                return Err(PdfSplitError::OutputDirectory {
                    reason: format!(
                        "{} already exists. Use --force to overwrite.",
                        output_path.display()
                    ),
                });
            }

            let mut section = source.extract_section(*range)?;
            section
                .save(&output_path)
                .map_err(|e| PdfSplitError::OutputDirectory {
                    reason: format!(
                        "Failed to write section file {}: {}",
                        output_path.display(),
                        e
                    ),
                })?;

            debug!(
                "Created section {} with {} pages (pages {}-{})",
                ordinal,
                range.page_count(),
                range.start + 1,
                range.end
            );
            info!("Saved: {}", output_path.display());

            sections.push(SectionFile {
                ordinal,
                name,
                path: output_path,
                range: *range,
            });
        }

        let manifest_file = if config.write_manifest {
            let manifest_path = Self::manifest_filename(config);
            Self::write_manifest(&manifest_path, report, &sections).await?;
            Some(manifest_path)
        } else {
            None
        };

        info!(
            "Successfully split document into {} files",
            sections.len()
        );

        Ok(SplitOutcome {
            sections,
            manifest_file,
        })
    }

    fn resolve_section_name(
        config: &SplitConfig,
        ordinal: usize,
        prompts: &mut dyn PromptSource,
    ) -> Result<String> {
        let default_name = format!("{}_{}", config.base_name, ordinal);
        if config.auto_names {
            return Ok(default_name);
        }

        let answer = prompts.ask(&format!(
            "Enter name for section {} (press Enter to use {}): ",
            ordinal, default_name
        ))?;

        if answer.trim().is_empty() {
            Ok(default_name)
        } else {
            Ok(answer.trim().to_string())
        }
    }

    async fn ensure_output_directory(output_dir: &PathBuf) -> Result<()> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).await.map_err(|e| {
                PdfSplitError::OutputDirectory {
                    reason: format!("Failed to create output directory: {}", e),
                }
            })?;
            info!("Created output directory: {}", output_dir.display());
        }
        Ok(())
    }

    fn manifest_filename(config: &SplitConfig) -> PathBuf {
        config
            .output_dir
            .join(format!("{}_manifest.json", config.base_name))
    }

    async fn write_manifest(
        manifest_path: &PathBuf,
        report: &ScanReport,
        sections: &[SectionFile],
    ) -> Result<()> {
        let manifest = serde_json::json!({
            "source": report.source,
            "phrase": report.phrase,
            "page_count": report.page_count,
            "matches": report.matches,
            "skipped_leading_pages": report.skipped_leading_pages,
            "created_at": chrono::Utc::now().to_rfc3339(),
            "sections": sections.iter().map(|section| {
                serde_json::json!({
                    "ordinal": section.ordinal,
                    "name": section.name,
                    "path": section.path.to_str().unwrap_or_default(),
                    "start_page": section.range.start + 1,
                    "end_page": section.range.end,
                    "pages": section.range.page_count(),
                })
            }).collect::<Vec<_>>()
        });

        let json_content = serde_json::to_string_pretty(&manifest).map_err(|e| {
            PdfSplitError::OutputDirectory {
                reason: format!("Failed to serialize manifest: {}", e),
            }
        })?;

        fs::write(manifest_path, json_content).await.map_err(|e| {
            PdfSplitError::OutputDirectory {
                reason: format!("Failed to write manifest file: {}", e),
            }
        })?;

        info!("Generated manifest file: {}", manifest_path.display());
        Ok(())
    }
}
