//! Error types for document loading and structuring.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading or structuring documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file extension is not a text format folio can structure.
    ///
    /// Binary formats must be converted to text by an external extractor first.
    #[error("unsupported source format: {path}")]
    UnsupportedFormat {
        /// Path to the unsupported file.
        path: PathBuf,
    },

    /// A knowledge identifier could not be coerced to a number.
    #[error("invalid knowledge id '{value}': expected a non-negative integer")]
    InvalidKnowledgeId {
        /// The rejected input.
        value: String,
    },

    /// Failed to compile the matcher for a frequent heading word.
    #[error("failed to build matcher for '{word}': {source}")]
    Matcher {
        /// The word the matcher was built for.
        word: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}
