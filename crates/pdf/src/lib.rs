//! PDF I/O for pdfdiff.
//!
//! This crate is the imperative shell around `pdfdiff_core`: it loads
//! documents with `lopdf`, interprets page content into structured text,
//! composes the side-by-side output and runs the comparison.

use std::path::PathBuf;

use thiserror::Error;

pub mod compare;
pub mod compose;
pub mod parser;
pub mod text;

#[cfg(test)]
mod fixtures;

pub use compare::{compare, compare_pdfs, CompareOptions, DocumentPair, SourceDocument};
pub use compose::Compositor;

/// Low-level failures of the `lopdf` layer.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("PDF writing error: {0}")]
    Write(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a comparison run.
#[derive(Debug, Error)]
pub enum CompareError {
    /// An input is missing, unreadable, not a PDF or encrypted, or neither
    /// input has any pages.
    #[error("Cannot open {}: {reason}", path.display())]
    DocumentOpen { path: PathBuf, reason: String },
    /// Text of one page (0-based) could not be extracted.
    #[error("Cannot extract text from page {}: {reason}", page + 1)]
    Extraction { page: usize, reason: String },
    #[error("Cannot compose output: {reason}")]
    Composition { reason: String },
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CompareError {
    /// The file the error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            CompareError::DocumentOpen { path, .. } | CompareError::Io { path, .. } => Some(path),
            CompareError::Extraction { .. } | CompareError::Composition { .. } => None,
        }
    }
}
