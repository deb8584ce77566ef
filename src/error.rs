//! Extraction errors.
//!
//! Every failure except a per-page PDF text failure aborts the call and is
//! returned to the caller with the underlying cause attached.

use thiserror::Error;

/// Extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported MIME type: {0}")]
    UnsupportedMimeType(String),

    #[error("Invalid {what} content: {source:#}")]
    InvalidContent {
        what: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Encrypted PDF documents are not supported")]
    EncryptedDocumentUnsupported,

    #[error("Engine error: {0:#}")]
    Engine(#[source] anyhow::Error),
}

impl ExtractError {
    pub(crate) fn invalid(what: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::InvalidContent {
            what,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
