//! Topic tree construction from heading events.
//!
//! The structurer is a two-state machine driven by the heading scanner. Headings at the
//! subtopic-boundary level open a new [`Subtopic`]; headings at the chapter-boundary level open a
//! new [`Chapter`] inside the current subtopic. Which levels are boundaries is chosen by a
//! [`BoundaryPolicy`]. When a subtopic closes, its leftover text is captured as a synthesized
//! "Notes" chapter according to [`LeftoverSemantics`].
//!
//! Line slices never include the boundary heading line itself: a chapter opened at line `L`
//! owns `lines[L + 1..end)`.

use std::{fmt, mem, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    model::{Chapter, NOTES_TITLE, Subtopic, Topic},
    patterns::{DEFAULT_PATTERN_THRESHOLD, PatternCounter},
    scan::{Heading, HeadingScanner},
};

/// Mapping from heading level to structural boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// `#` opens a subtopic, `##` opens a chapter.
    #[default]
    TwoLevel,
    /// `#` or `##` opens a subtopic, `###` opens a chapter.
    ThreeLevel,
}

/// What a heading does to the structure under a given policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Closes the current subtopic and opens a new one.
    Subtopic,
    /// Closes the current chapter and opens a new one, if a subtopic is open.
    Chapter,
    /// No structural effect; the heading line stays in the surrounding body text.
    Ignored,
}

impl BoundaryPolicy {
    /// Classifies a heading level.
    pub fn classify(self, level: u8) -> Boundary {
        match (self, level) {
            (Self::TwoLevel, 1) | (Self::ThreeLevel, 1 | 2) => Boundary::Subtopic,
            (Self::TwoLevel, 2) | (Self::ThreeLevel, 3) => Boundary::Chapter,
            _ => Boundary::Ignored,
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoLevel => write!(f, "two-level"),
            Self::ThreeLevel => write!(f, "three-level"),
        }
    }
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "two-level" | "two" | "2" => Ok(Self::TwoLevel),
            "three-level" | "three" | "3" => Ok(Self::ThreeLevel),
            _ => Err(format!(
                "unknown boundary policy '{s}' (expected two-level or three-level)"
            )),
        }
    }
}

/// Which lines a subtopic's "Notes" chapter captures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeftoverSemantics {
    /// Everything after the subtopic heading up to the next subtopic, chapter text included.
    #[default]
    RawDuplicate,
    /// Only the text between the subtopic heading and its first chapter heading.
    TrueRemainder,
}

impl fmt::Display for LeftoverSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawDuplicate => write!(f, "raw-duplicate"),
            Self::TrueRemainder => write!(f, "true-remainder"),
        }
    }
}

impl FromStr for LeftoverSemantics {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw-duplicate" | "raw" => Ok(Self::RawDuplicate),
            "true-remainder" | "remainder" => Ok(Self::TrueRemainder),
            _ => Err(format!(
                "unknown leftover semantics '{s}' (expected raw-duplicate or true-remainder)"
            )),
        }
    }
}

/// Options controlling one structuring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureOptions {
    /// Heading-level boundary mapping.
    pub policy: BoundaryPolicy,
    /// Notes chapter capture rule.
    pub leftover: LeftoverSemantics,
    /// A first word must occur more than this many times to be reported as frequent.
    pub pattern_threshold: usize,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            policy: BoundaryPolicy::default(),
            leftover: LeftoverSemantics::default(),
            pattern_threshold: DEFAULT_PATTERN_THRESHOLD,
        }
    }
}

/// A chapter heading that has been seen but not yet closed.
#[derive(Debug)]
struct OpenChapter {
    /// Heading text.
    title: String,
    /// Line index of the heading.
    start_line: usize,
}

/// A subtopic that is still accepting chapters.
#[derive(Debug)]
struct OpenSubtopic {
    /// Subtopic under construction.
    subtopic: Subtopic,
    /// Line of the first chapter-boundary heading, which ends the subtopic's own intro text.
    first_chapter_line: Option<usize>,
}

/// Structurer state.
#[derive(Debug, Default)]
enum State {
    /// Before the first subtopic-boundary heading.
    #[default]
    NoSubtopicOpen,
    /// Inside a subtopic, optionally inside one of its chapters.
    SubtopicOpen {
        /// The current subtopic.
        subtopic: OpenSubtopic,
        /// The current chapter cursor.
        chapter: Option<OpenChapter>,
    },
}

/// Builds a [`Topic`] from a stream of headings over a fixed set of lines.
#[derive(Debug)]
pub struct Structurer<'a> {
    /// Source lines the headings were scanned from.
    lines: &'a [&'a str],
    /// Boundary policy.
    policy: BoundaryPolicy,
    /// Leftover capture rule.
    leftover: LeftoverSemantics,
    /// Topic being built.
    topic: Topic,
    /// Current cursors.
    state: State,
}

impl<'a> Structurer<'a> {
    /// Creates a structurer for a document's lines.
    pub fn new(
        lines: &'a [&'a str],
        name: impl Into<String>,
        knowledge_id: u64,
        options: &StructureOptions,
    ) -> Self {
        Self {
            lines,
            policy: options.policy,
            leftover: options.leftover,
            topic: Topic::new(name, knowledge_id),
            state: State::NoSubtopicOpen,
        }
    }

    /// Applies one heading event.
    ///
    /// Headings must arrive in source order.
    pub fn handle(&mut self, heading: &Heading) {
        let line = heading.line_number;
        match self.policy.classify(heading.level) {
            Boundary::Subtopic => {
                self.close_subtopic(line);
                debug!(title = %heading.title, line, "opened subtopic");
                self.state = State::SubtopicOpen {
                    subtopic: OpenSubtopic {
                        subtopic: Subtopic::new(heading.title.clone(), line),
                        first_chapter_line: None,
                    },
                    chapter: None,
                };
            }
            Boundary::Chapter => {
                let State::SubtopicOpen { subtopic, chapter } = &mut self.state else {
                    debug!(title = %heading.title, line, "chapter heading outside subtopic");
                    return;
                };
                if let Some(open) = chapter.take() {
                    finalize_chapter(self.lines, &mut subtopic.subtopic, open, line);
                }
                subtopic.first_chapter_line.get_or_insert(line);
                *chapter = Some(OpenChapter {
                    title: heading.title.clone(),
                    start_line: line,
                });
            }
            Boundary::Ignored => {}
        }
    }

    /// Closes any open cursors at end of document and returns the finished topic.
    pub fn finish(mut self) -> Topic {
        self.close_subtopic(self.lines.len());
        debug!(
            subtopics = self.topic.subtopics.len(),
            chapters = self.topic.chapter_count(),
            "structured topic"
        );
        self.topic
    }

    /// Finalizes the open chapter and subtopic (if any), ending them before `end_line`.
    fn close_subtopic(&mut self, end_line: usize) {
        let State::SubtopicOpen {
            subtopic: mut open,
            chapter,
        } = mem::take(&mut self.state)
        else {
            return;
        };

        if let Some(chapter) = chapter {
            finalize_chapter(self.lines, &mut open.subtopic, chapter, end_line);
        }

        let leftover_start = open.subtopic.start_line + 1;
        let leftover_end = match self.leftover {
            LeftoverSemantics::RawDuplicate => end_line,
            LeftoverSemantics::TrueRemainder => open.first_chapter_line.unwrap_or(end_line),
        };
        let leftover = slice_content(self.lines, leftover_start, leftover_end);
        if !leftover.is_empty() {
            open.subtopic.chapters.push(Chapter {
                title: NOTES_TITLE.to_string(),
                start_line: open.subtopic.start_line,
                content: leftover,
            });
        }

        if open.subtopic.chapters.is_empty() {
            debug!(title = %open.subtopic.title, "dropped empty subtopic");
        } else {
            self.topic.subtopics.push(open.subtopic);
        }
    }
}

/// Closes a chapter before `end_line`, keeping it only if it has content.
fn finalize_chapter(lines: &[&str], subtopic: &mut Subtopic, chapter: OpenChapter, end_line: usize) {
    let content = slice_content(lines, chapter.start_line + 1, end_line);
    if content.is_empty() {
        debug!(title = %chapter.title, line = chapter.start_line, "dropped empty chapter");
        return;
    }
    subtopic.chapters.push(Chapter {
        title: chapter.title,
        start_line: chapter.start_line,
        content,
    });
}

/// Joins `lines[start..end)` with newlines and trims the result.
fn slice_content(lines: &[&str], start: usize, end: usize) -> String {
    let end = end.min(lines.len());
    if start >= end {
        return String::new();
    }
    lines[start..end].join("\n").trim().to_string()
}

/// Scans `lines` and builds the topic tree, reporting every heading to `patterns`.
pub fn structure_lines(
    lines: &[&str],
    name: &str,
    knowledge_id: u64,
    options: &StructureOptions,
    patterns: &mut PatternCounter,
) -> Topic {
    let mut structurer = Structurer::new(lines, name, knowledge_id, options);
    for heading in HeadingScanner::new(lines, patterns) {
        structurer.handle(&heading);
    }
    structurer.finish()
}
