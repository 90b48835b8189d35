//! Document structuring for folio.
//!
//! This crate turns a flat, heading-structured text document into a Topic → Subtopic → Chapter
//! tree and projects that tree into storage-ready records. It provides:
//! - An ATX heading scanner (`#` to `######` lines only)
//! - Frequency detection of recurring heading first words
//! - A configurable structurer (two- or three-level boundaries, Notes leftover capture)
//! - A flattener assigning sequence IDs and positional subtopic labels

#![warn(missing_docs)]

mod error;
mod flatten;
mod model;
mod parse;
mod patterns;
mod scan;
mod structure;

pub use error::DocumentError;
pub use flatten::{ChapterRecord, Flattener, count_lines, flatten_topic, subtopic_label};
pub use model::{Chapter, NOTES_TITLE, Subtopic, Topic};
pub use parse::{StructuredDocument, load_document, parse_knowledge_id, structure_document};
pub use patterns::{DEFAULT_PATTERN_THRESHOLD, FrequentPattern, PatternCounter};
pub use scan::{Heading, HeadingScanner, parse_heading, split_lines};
pub use structure::{
    Boundary, BoundaryPolicy, LeftoverSemantics, StructureOptions, Structurer, structure_lines,
};

/// A text document ready for structuring.
///
/// Documents are read once and never mutated.
#[derive(Debug, Clone)]
pub struct Document {
    /// Display name, used as the topic name.
    pub name: String,
    /// Knowledge identifier the document is tagged with.
    pub knowledge_id: u64,
    /// Full text, split into lines on `\n` when structured.
    pub text: String,
}

impl Document {
    /// Creates a document from in-memory text.
    pub fn new(name: impl Into<String>, knowledge_id: u64, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            knowledge_id,
            text: text.into(),
        }
    }

    /// Returns the document's lines.
    pub fn lines(&self) -> Vec<&str> {
        split_lines(&self.text)
    }
}
