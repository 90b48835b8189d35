//! High-level loading and structuring API.
//!
//! Reads a text document from disk and runs the scan → structure → detect pipeline over it.

use std::{fs, path::Path};

use serde::Serialize;
use tracing::info;

use crate::{
    Document, DocumentError,
    model::Topic,
    patterns::{FrequentPattern, PatternCounter},
    scan::split_lines,
    structure::{StructureOptions, structure_lines},
};

/// Result of structuring a document: the topic tree plus the frequent heading words.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredDocument {
    /// The finished topic tree.
    pub topic: Topic,
    /// Heading first words that recur beyond the configured threshold.
    pub patterns: Vec<FrequentPattern>,
}

/// Coerces a knowledge identifier given as text into a number.
pub fn parse_knowledge_id(value: &str) -> Result<u64, DocumentError> {
    value
        .trim()
        .parse()
        .map_err(|_| DocumentError::InvalidKnowledgeId {
            value: value.to_string(),
        })
}

/// Loads a document from disk, checking its extension.
///
/// Supported extensions:
/// - `.md`, `.markdown` - Markdown
/// - `.txt` - plain text, typically the output of an external extractor
///
/// The display name defaults to the file stem.
pub fn load_document(
    path: &Path,
    knowledge_id: u64,
    name: Option<&str>,
) -> Result<Document, DocumentError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md" | "markdown" | "txt") => {}
        _ => {
            return Err(DocumentError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    }

    let text = fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let name = name.map(str::to_string).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    });

    Ok(Document {
        name,
        knowledge_id,
        text,
    })
}

/// Structures a document and detects its frequent heading words.
pub fn structure_document(
    document: &Document,
    options: &StructureOptions,
) -> Result<StructuredDocument, DocumentError> {
    let lines = split_lines(&document.text);
    let mut counter = PatternCounter::new();
    let topic = structure_lines(
        &lines,
        &document.name,
        document.knowledge_id,
        options,
        &mut counter,
    );
    let patterns = counter.finish(options.pattern_threshold)?;

    info!(
        document = %document.name,
        lines = lines.len(),
        subtopics = topic.subtopics.len(),
        chapters = topic.chapter_count(),
        patterns = patterns.len(),
        "structured document"
    );

    Ok(StructuredDocument { topic, patterns })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{flatten::flatten_topic, structure::BoundaryPolicy};

    fn document(text: &str) -> Document {
        Document {
            name: "Maths".to_string(),
            knowledge_id: 9,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_knowledge_id() {
        assert_eq!(parse_knowledge_id("17").unwrap(), 17);
        assert_eq!(parse_knowledge_id(" 3 ").unwrap(), 3);
        assert!(matches!(
            parse_knowledge_id("abc"),
            Err(DocumentError::InvalidKnowledgeId { .. })
        ));
        assert!(parse_knowledge_id("-1").is_err());
    }

    #[test]
    fn test_load_document_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("algebra.md");
        fs::write(&path, "# Algebra\ntext").unwrap();

        let doc = load_document(&path, 5, None).unwrap();
        assert_eq!(doc.name, "algebra");
        assert_eq!(doc.knowledge_id, 5);
        assert_eq!(doc.text, "# Algebra\ntext");
    }

    #[test]
    fn test_load_document_explicit_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted.txt");
        fs::write(&path, "# Intro\n").unwrap();

        let doc = load_document(&path, 1, Some("Biology")).unwrap();
        assert_eq!(doc.name, "Biology");
    }

    #[test]
    fn test_load_document_rejects_binary_formats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.pdf");
        fs::write(&path, b"%PDF-1.7").unwrap();

        let err = load_document(&path, 1, None).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat { .. }));
        assert!(err.to_string().contains("book.pdf"));
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("missing.md"), 1, None).unwrap_err();
        assert!(matches!(err, DocumentError::ReadFile { .. }));
    }

    #[test]
    fn test_structure_document_with_patterns() {
        let mut text = String::new();
        for i in 1..=7 {
            text.push_str(&format!("# Chapter {i}\nBody {i}\n"));
        }
        let result = structure_document(&document(&text), &StructureOptions::default()).unwrap();

        assert_eq!(result.topic.subtopics.len(), 7);
        assert_eq!(result.patterns.len(), 1);
        assert_eq!(result.patterns[0].word, "chapter");
        assert_eq!(result.patterns[0].count, 7);
    }

    #[test]
    fn test_structure_document_without_headings() {
        let result =
            structure_document(&document("no headings\nat all"), &StructureOptions::default())
                .unwrap();
        assert!(result.topic.is_empty());
        assert!(result.patterns.is_empty());
        assert!(flatten_topic(&result.topic).is_empty());
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let text = "# A\nintro\n## B\nbody\n# C\n## D\nmore\n### E\ndeep";
        let options = StructureOptions {
            policy: BoundaryPolicy::ThreeLevel,
            ..StructureOptions::default()
        };
        let doc = document(text);

        let first = flatten_topic(&structure_document(&doc, &options).unwrap().topic);
        let second = flatten_topic(&structure_document(&doc, &options).unwrap().topic);
        assert_eq!(first, second);
    }

    #[test]
    fn test_structured_document_serializes() {
        let result =
            structure_document(&document("# A\nbody"), &StructureOptions::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["topic"]["name"], "Maths");
        assert_eq!(json["topic"]["subtopics"][0]["title"], "A");
        assert_eq!(json["topic"]["subtopics"][0]["chapters"][0]["title"], "Notes");
        assert!(json["patterns"].as_array().unwrap().is_empty());
    }
}
