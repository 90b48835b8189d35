//! Shared helpers for command implementations.

use std::{path::Path, process::ExitCode};

use folio_document::{
    Document, DocumentError, StructureOptions, StructuredDocument, load_document,
    structure_document,
};

use crate::cli::args::DocumentArgs;

/// Loads the document named on the command line.
pub fn load_input(document: &DocumentArgs) -> Result<Document, ExitCode> {
    load_file(
        &document.file,
        document.knowledge_id,
        document.name.as_deref(),
    )
}

/// Loads a document, reporting failures on stderr.
pub fn load_file(path: &Path, knowledge_id: u64, name: Option<&str>) -> Result<Document, ExitCode> {
    load_document(path, knowledge_id, name).map_err(|e| {
        eprintln!("error: {e}");
        if matches!(e, DocumentError::UnsupportedFormat { .. }) {
            eprintln!("Supported types: .md, .markdown, .txt");
        }
        ExitCode::FAILURE
    })
}

/// Structures a loaded document with the resolved options.
pub fn structure_input(
    document: &Document,
    options: &StructureOptions,
) -> Result<StructuredDocument, ExitCode> {
    structure_document(document, options).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Returns the stem used to name a document's artifacts.
pub fn artifact_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_stem() {
        assert_eq!(artifact_stem(Path::new("books/algebra.md")), "algebra");
        assert_eq!(artifact_stem(Path::new("notes.v2.txt")), "notes.v2");
        assert_eq!(artifact_stem(Path::new("")), "document");
    }
}
