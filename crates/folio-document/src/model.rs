//! The textbook hierarchy: Topic → Subtopic → Chapter.
//!
//! A [`Topic`] is built once per document by the structurer and then handed to the flattener.
//! Ordering at every level is source order.

use serde::Serialize;

/// Title given to the chapter synthesized from a subtopic's leftover text.
pub const NOTES_TITLE: &str = "Notes";

/// The smallest structural unit, holding body text shown downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// Chapter title (heading text, or [`NOTES_TITLE`]).
    pub title: String,
    /// 0-based line index of the chapter heading.
    pub start_line: usize,
    /// Trimmed body text; never empty for chapters stored in a subtopic.
    pub content: String,
}

/// A boundary-delimited section of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtopic {
    /// Subtopic title (heading text).
    pub title: String,
    /// 0-based line index of the subtopic heading.
    pub start_line: usize,
    /// Chapters in source order, with any Notes chapter last.
    pub chapters: Vec<Chapter>,
}

impl Subtopic {
    /// Creates a subtopic with no chapters.
    pub fn new(title: impl Into<String>, start_line: usize) -> Self {
        Self {
            title: title.into(),
            start_line,
            chapters: Vec::new(),
        }
    }

    /// Returns the Notes chapter, if one was synthesized.
    pub fn notes(&self) -> Option<&Chapter> {
        self.chapters
            .last()
            .filter(|c| c.title == NOTES_TITLE && c.start_line == self.start_line)
    }
}

/// The root of one structured document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Display name of the document.
    pub name: String,
    /// Knowledge identifier the document was tagged with.
    pub knowledge_id: u64,
    /// Subtopics in source order; each holds at least one chapter.
    pub subtopics: Vec<Subtopic>,
}

impl Topic {
    /// Creates an empty topic.
    pub fn new(name: impl Into<String>, knowledge_id: u64) -> Self {
        Self {
            name: name.into(),
            knowledge_id,
            subtopics: Vec::new(),
        }
    }

    /// Returns the total number of chapters across all subtopics.
    pub fn chapter_count(&self) -> usize {
        self.subtopics.iter().map(|s| s.chapters.len()).sum()
    }

    /// Returns true if the topic has no subtopics.
    pub fn is_empty(&self) -> bool {
        self.subtopics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(title: &str, start_line: usize) -> Chapter {
        Chapter {
            title: title.to_string(),
            start_line,
            content: "body".to_string(),
        }
    }

    #[test]
    fn test_chapter_count() {
        let mut topic = Topic::new("Maths", 7);
        let mut first = Subtopic::new("Algebra", 0);
        first.chapters.push(chapter("Linear", 2));
        first.chapters.push(chapter("Quadratic", 4));
        let mut second = Subtopic::new("Geometry", 6);
        second.chapters.push(chapter("Angles", 7));
        topic.subtopics.push(first);
        topic.subtopics.push(second);

        assert_eq!(topic.chapter_count(), 3);
        assert!(!topic.is_empty());
    }

    #[test]
    fn test_notes_lookup() {
        let mut subtopic = Subtopic::new("Algebra", 4);
        subtopic.chapters.push(chapter("Linear", 5));
        assert!(subtopic.notes().is_none());

        subtopic.chapters.push(chapter(NOTES_TITLE, 4));
        assert_eq!(subtopic.notes().unwrap().title, "Notes");
    }

    #[test]
    fn test_heading_titled_notes_is_not_synthesized() {
        let mut subtopic = Subtopic::new("Algebra", 4);
        subtopic.chapters.push(chapter(NOTES_TITLE, 9));
        assert!(subtopic.notes().is_none());
    }
}
