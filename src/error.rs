//! Error handling for the resume tailor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TailorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Diff error: {0}")]
    Diff(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, TailorError>;

/// Convert anyhow errors raised by the server bootstrap
impl From<anyhow::Error> for TailorError {
    fn from(err: anyhow::Error) -> Self {
        TailorError::Server(format!("{:#}", err))
    }
}
