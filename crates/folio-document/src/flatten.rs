//! Projection of a topic tree into storage-ready records.
//!
//! The flattener walks `topic.subtopics[*].chapters[*]` depth-first in source order and emits
//! one [`ChapterRecord`] per chapter. Sequence IDs and subtopic labels are positional and are
//! assigned here, never during structuring.

use serde::{Deserialize, Serialize};

use crate::model::Topic;

/// A flattened, denormalized chapter ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// 1-based position of the record across the whole run.
    pub sequence_id: u64,
    /// Name of the topic the chapter belongs to.
    pub topic_name: String,
    /// Subtopic title suffixed with its 1-based position, e.g. `"Algebra 1"`.
    pub subtopic_label: String,
    /// Chapter title.
    pub chapter_title: String,
    /// Chapter content, verbatim.
    pub chapter_body: String,
    /// Number of newline-delimited lines in the body (0 when empty).
    pub line_count: usize,
    /// Knowledge identifier of the topic.
    pub knowledge_id: u64,
    /// Copy of `knowledge_id` under the field name older consumers read.
    #[serde(rename = "knowledgeId")]
    pub legacy_knowledge_id: u64,
}

/// Formats the positional label for the subtopic at `index` (0-based).
pub fn subtopic_label(title: &str, index: usize) -> String {
    format!("{} {}", title, index + 1)
}

/// Counts newline-delimited lines, treating empty text as zero lines.
pub fn count_lines(body: &str) -> usize {
    if body.is_empty() {
        0
    } else {
        body.split('\n').count()
    }
}

/// Assigns sequence IDs while flattening topics.
///
/// A flattener owns its counter; flattening several topics with one instance continues the
/// sequence, which is how independently built trees are serialized into one record list.
#[derive(Debug, Clone)]
pub struct Flattener {
    /// Sequence ID given to the next emitted record.
    next_sequence_id: u64,
}

impl Default for Flattener {
    fn default() -> Self {
        Self {
            next_sequence_id: 1,
        }
    }
}

impl Flattener {
    /// Creates a flattener whose first record gets sequence ID 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records emitted so far.
    pub fn emitted(&self) -> u64 {
        self.next_sequence_id - 1
    }

    /// Emits one record per chapter of `topic`, in source order.
    pub fn flatten(&mut self, topic: &Topic) -> Vec<ChapterRecord> {
        let mut records = Vec::with_capacity(topic.chapter_count());
        for (index, subtopic) in topic.subtopics.iter().enumerate() {
            let label = subtopic_label(&subtopic.title, index);
            for chapter in &subtopic.chapters {
                records.push(ChapterRecord {
                    sequence_id: self.next_sequence_id,
                    topic_name: topic.name.clone(),
                    subtopic_label: label.clone(),
                    chapter_title: chapter.title.clone(),
                    chapter_body: chapter.content.clone(),
                    line_count: count_lines(&chapter.content),
                    knowledge_id: topic.knowledge_id,
                    legacy_knowledge_id: topic.knowledge_id,
                });
                self.next_sequence_id += 1;
            }
        }
        records
    }
}

/// Flattens a single topic with a fresh sequence starting at 1.
pub fn flatten_topic(topic: &Topic) -> Vec<ChapterRecord> {
    Flattener::new().flatten(topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, Subtopic};

    fn subtopic(title: &str, start_line: usize, chapters: &[(&str, &str)]) -> Subtopic {
        let mut subtopic = Subtopic::new(title, start_line);
        for (offset, (title, content)) in chapters.iter().enumerate() {
            subtopic.chapters.push(Chapter {
                title: (*title).to_string(),
                start_line: start_line + offset + 1,
                content: (*content).to_string(),
            });
        }
        subtopic
    }

    fn two_and_three() -> Topic {
        let mut topic = Topic::new("Physics", 42);
        topic
            .subtopics
            .push(subtopic("Motion", 0, &[("Speed", "a"), ("Velocity", "b\nc")]));
        topic.subtopics.push(subtopic(
            "Energy",
            10,
            &[("Work", "d"), ("Power", "e"), ("Notes", "f\ng\nh")],
        ));
        topic
    }

    #[test]
    fn test_flatten_assigns_sequence_and_labels() {
        let records = flatten_topic(&two_and_three());

        let ids: Vec<u64> = records.iter().map(|r| r.sequence_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let labels: Vec<&str> = records.iter().map(|r| r.subtopic_label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Motion 1", "Motion 1", "Energy 2", "Energy 2", "Energy 2"]
        );
    }

    #[test]
    fn test_flatten_copies_fields() {
        let records = flatten_topic(&two_and_three());
        let velocity = &records[1];

        assert_eq!(velocity.topic_name, "Physics");
        assert_eq!(velocity.chapter_title, "Velocity");
        assert_eq!(velocity.chapter_body, "b\nc");
        assert_eq!(velocity.line_count, 2);
        assert_eq!(velocity.knowledge_id, 42);
        assert_eq!(velocity.legacy_knowledge_id, 42);
        assert_eq!(records[4].line_count, 3);
    }

    #[test]
    fn test_flatten_empty_topic() {
        assert!(flatten_topic(&Topic::new("Empty", 1)).is_empty());
    }

    #[test]
    fn test_labels_unique_for_repeated_titles() {
        let mut topic = Topic::new("T", 1);
        topic.subtopics.push(subtopic("Review", 0, &[("A", "x")]));
        topic.subtopics.push(subtopic("Review", 5, &[("B", "y")]));

        let records = flatten_topic(&topic);
        assert_eq!(records[0].subtopic_label, "Review 1");
        assert_eq!(records[1].subtopic_label, "Review 2");
    }

    #[test]
    fn test_reordering_subtopics_only_changes_labels() {
        let topic = two_and_three();
        let mut swapped = topic.clone();
        swapped.subtopics.swap(0, 1);

        let original = flatten_topic(&topic);
        let reordered = flatten_topic(&swapped);

        let speed = reordered.iter().find(|r| r.chapter_title == "Speed").unwrap();
        assert_eq!(speed.subtopic_label, "Motion 2");
        assert_eq!(speed.chapter_body, original[0].chapter_body);
        assert_eq!(speed.line_count, original[0].line_count);
    }

    #[test]
    fn test_flattener_continues_sequence_across_topics() {
        let mut flattener = Flattener::new();
        let first = flattener.flatten(&two_and_three());
        let second = flattener.flatten(&two_and_three());

        assert_eq!(first.last().unwrap().sequence_id, 5);
        assert_eq!(second.first().unwrap().sequence_id, 6);
        assert_eq!(second.first().unwrap().subtopic_label, "Motion 1");
        assert_eq!(flattener.emitted(), 10);
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("one"), 1);
        assert_eq!(count_lines("one\ntwo"), 2);
        assert_eq!(count_lines("one\n\nthree"), 3);
    }

    #[test]
    fn test_record_serializes_legacy_field() {
        let records = flatten_topic(&two_and_three());
        let json = serde_json::to_value(&records[0]).unwrap();

        assert_eq!(json["sequence_id"], 1);
        assert_eq!(json["knowledge_id"], 42);
        assert_eq!(json["knowledgeId"], 42);
        assert_eq!(json["subtopic_label"], "Motion 1");
    }
}
