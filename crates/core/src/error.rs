//! Error types for PDF to HTML conversion.

use std::path::PathBuf;

use bolivar_core::PdfError;
use thiserror::Error;

/// Primary error type for conversion operations.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("cannot read source {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("extraction failed: {0}")]
    Extraction(#[from] PdfError),

    #[error("cannot write destination {}: {source}", path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

/// Convenience Result type alias for ConvertError.
pub type Result<T> = std::result::Result<T, ConvertError>;
