use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfSplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Page range error: {reason}")]
    PageRange { reason: String },

    #[error("Output directory error: {reason}")]
    OutputDirectory { reason: String },

    #[error("Section name collision: {name}")]
    NameCollision { name: String },

    #[error("Merge failed: {reason}")]
    Merge { reason: String },

    #[error("Prompt error: {reason}")]
    Prompt { reason: String },

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PdfSplitError>;
