//! ATX heading scanner.
//!
//! Walks the lines of a document once, in order, and yields a [`Heading`] for every line of the
//! form `#{1,6}<whitespace><title>`. Every heading seen is also reported to a
//! [`PatternCounter`], whether or not the structurer ends up using it.

use std::{iter::Enumerate, slice::Iter, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::patterns::PatternCounter;

/// Matches an ATX heading line, capturing the marker run and the title text.
static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)").expect("valid heading regex"));

/// A heading line recognized by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level (1-6, the number of leading `#`).
    pub level: u8,
    /// Heading text with surrounding whitespace trimmed.
    pub title: String,
    /// 0-based index of the heading line.
    pub line_number: usize,
}

/// Parses a single line as an ATX heading.
///
/// Returns `None` for lines that are not headings, including `#` runs longer than six and
/// markers not followed by whitespace (`#hashtag`).
pub fn parse_heading(line: &str, line_number: usize) -> Option<Heading> {
    let caps = HEADING_PATTERN.captures(line)?;
    let level = caps.get(1)?.as_str().len();
    let title = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some(Heading {
        level: u8::try_from(level).ok()?,
        title: title.to_string(),
        line_number,
    })
}

/// Splits text into lines on `\n`, dropping a trailing `\r` from each line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Single-pass iterator over the headings of a document.
///
/// The scanner is not restartable; each heading it yields has already been counted by the
/// pattern counter it was created with.
pub struct HeadingScanner<'a, 'p> {
    /// Remaining lines, paired with their indices.
    lines: Enumerate<Iter<'a, &'a str>>,
    /// Receives the first word of every heading title.
    patterns: &'p mut PatternCounter,
}

impl<'a, 'p> HeadingScanner<'a, 'p> {
    /// Creates a scanner over `lines` feeding `patterns`.
    pub fn new(lines: &'a [&'a str], patterns: &'p mut PatternCounter) -> Self {
        Self {
            lines: lines.iter().enumerate(),
            patterns,
        }
    }
}

impl Iterator for HeadingScanner<'_, '_> {
    type Item = Heading;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            if let Some(heading) = parse_heading(line, index) {
                self.patterns.observe(&heading.title);
                return Some(heading);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_levels() {
        for level in 1..=6 {
            let line = format!("{} Title", "#".repeat(level));
            let heading = parse_heading(&line, 3).unwrap();
            assert_eq!(usize::from(heading.level), level);
            assert_eq!(heading.title, "Title");
            assert_eq!(heading.line_number, 3);
        }
    }

    #[test]
    fn test_parse_heading_rejects_non_headings() {
        assert!(parse_heading("####### Too deep", 0).is_none());
        assert!(parse_heading("#hashtag", 0).is_none());
        assert!(parse_heading(" # indented", 0).is_none());
        assert!(parse_heading("plain text", 0).is_none());
        assert!(parse_heading("#", 0).is_none());
        assert!(parse_heading("", 0).is_none());
    }

    #[test]
    fn test_parse_heading_trims_title() {
        let heading = parse_heading("##\t  Spaced out   ", 0).unwrap();
        assert_eq!(heading.level, 2);
        assert_eq!(heading.title, "Spaced out");
    }

    #[test]
    fn test_parse_heading_empty_title() {
        let heading = parse_heading("###   ", 0).unwrap();
        assert_eq!(heading.level, 3);
        assert_eq!(heading.title, "");
    }

    #[test]
    fn test_split_lines_strips_carriage_returns() {
        assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
    }

    #[test]
    fn test_scanner_yields_in_source_order() {
        let lines = split_lines("# One\ntext\n## Two\n#### Four\nmore");
        let mut patterns = PatternCounter::new();
        let headings: Vec<Heading> = HeadingScanner::new(&lines, &mut patterns).collect();

        let summary: Vec<(u8, &str, usize)> = headings
            .iter()
            .map(|h| (h.level, h.title.as_str(), h.line_number))
            .collect();
        assert_eq!(summary, vec![(1, "One", 0), (2, "Two", 2), (4, "Four", 3)]);
    }

    #[test]
    fn test_scanner_counts_every_heading() {
        let lines = split_lines("# Chapter 1\n###### chapter 2\nChapter 3 is text");
        let mut patterns = PatternCounter::new();
        let count = HeadingScanner::new(&lines, &mut patterns).count();

        assert_eq!(count, 2);
        assert_eq!(patterns.count("chapter"), 2);
    }

    #[test]
    fn test_scanner_treats_fenced_code_as_lines() {
        let lines = split_lines("```\n# not special to markdown here\n```");
        let mut patterns = PatternCounter::new();
        let headings: Vec<Heading> = HeadingScanner::new(&lines, &mut patterns).collect();
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].line_number, 1);
    }
}
