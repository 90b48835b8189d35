//! Implementation of `folio inspect`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use folio_document::{
    ChapterRecord, FrequentPattern, StructureOptions, StructuredDocument, Topic, count_lines,
    flatten_topic,
};
use serde::Serialize;

use super::shared::{load_input, structure_input};
use crate::cli::{
    args::InspectCommand,
    context::CommandContext,
    output::{dim, header, print_json, subheader},
};

/// JSON output for `folio inspect --json`.
#[derive(Serialize)]
struct JsonInspect<'a> {
    /// Options the document was structured with.
    options: &'a StructureOptions,
    /// The structured topic tree.
    topic: &'a Topic,
    /// Frequent heading first words.
    patterns: &'a [FrequentPattern],
    /// Flattened records.
    records: &'a [ChapterRecord],
}

/// Shows the topic tree, frequent heading words and flattened records for a document.
pub fn run(ctx: &CommandContext, cmd: &InspectCommand) -> ExitCode {
    let document = match load_input(&cmd.document) {
        Ok(document) => document,
        Err(code) => return code,
    };
    let options = cmd.structure.resolve(&ctx.config);
    let structured = match structure_input(&document, &options) {
        Ok(structured) => structured,
        Err(code) => return code,
    };
    let records = flatten_topic(&structured.topic);

    if cmd.json {
        return print_json(&JsonInspect {
            options: &options,
            topic: &structured.topic,
            patterns: &structured.patterns,
            records: &records,
        });
    }

    print_tree(&structured, &options);
    print_patterns(&structured.patterns, options.pattern_threshold);
    print_records(&records);

    ExitCode::SUCCESS
}

/// Prints the topic, its subtopics and their chapters.
fn print_tree(structured: &StructuredDocument, options: &StructureOptions) {
    let topic = &structured.topic;
    println!(
        "--- {} ---",
        header(&format!("{} (knowledge id {})", topic.name, topic.knowledge_id))
    );
    println!(
        "{}",
        dim(&format!(
            "{} boundaries, {} notes -> {} subtopics, {} chapters",
            options.policy,
            options.leftover,
            topic.subtopics.len(),
            topic.chapter_count()
        ))
    );
    println!();

    if topic.is_empty() {
        println!("{}", dim("  (no subtopics)"));
        println!();
        return;
    }

    for subtopic in &topic.subtopics {
        println!(
            "{} {}",
            subheader(&subtopic.title),
            dim(&format!("(line {})", subtopic.start_line + 1))
        );
        for chapter in &subtopic.chapters {
            println!(
                "   {} {}",
                chapter.title,
                dim(&format!(
                    "(line {}, {} lines)",
                    chapter.start_line + 1,
                    count_lines(&chapter.content)
                ))
            );
        }
    }
    println!();
}

/// Prints the frequent heading first words.
fn print_patterns(patterns: &[FrequentPattern], threshold: usize) {
    println!(
        "--- {} ---",
        header(&format!("patterns (more than {threshold})"))
    );
    if patterns.is_empty() {
        println!("{}", dim("  (no frequent heading words)"));
    } else {
        let width = patterns.iter().map(|p| p.word.len()).max().unwrap_or(0);
        for pattern in patterns {
            println!("  {:<width$}  {}", pattern.word, pattern.count);
        }
    }
    println!();
}

/// Prints the flattened records as a table.
fn print_records(records: &[ChapterRecord]) {
    println!("--- {} ---", header(&format!("records ({})", records.len())));
    if records.is_empty() {
        println!("{}", dim("  (no records)"));
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Seq", "Subtopic", "Chapter", "Lines"]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.sequence_id),
            Cell::new(&record.subtopic_label),
            Cell::new(&record.chapter_title),
            Cell::new(record.line_count),
        ]);
    }
    println!("{table}");
}
