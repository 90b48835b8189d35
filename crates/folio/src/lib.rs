//! folio: textbook structuring for heading-based documents.
//!
//! folio reads a flat Markdown or plain-text document, maps its ATX headings onto a
//! Topic → Subtopic → Chapter hierarchy, and flattens that hierarchy into numbered chapter
//! records that are written to a sink in fixed-size batches.

#![warn(missing_docs)]

pub mod cli;
