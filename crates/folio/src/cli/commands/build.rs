//! Implementation of `folio build`.

use std::{fs, path::PathBuf, process::ExitCode};

use folio_document::flatten_topic;

use super::shared::{artifact_stem, load_input, structure_input};
use crate::cli::{args::BuildCommand, context::CommandContext, output::to_pretty_json};

/// Structures a document and writes its raw text, structure and records artifacts.
pub fn run(ctx: &CommandContext, cmd: &BuildCommand) -> ExitCode {
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

    let structure_json = match to_pretty_json(&structured) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: failed to serialize structure: {e}");
            return ExitCode::FAILURE;
        }
    };
    let records_json = match to_pretty_json(&records) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: failed to serialize records: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::create_dir_all(&cmd.out_dir) {
        eprintln!("error: failed to create {}: {e}", cmd.out_dir.display());
        return ExitCode::FAILURE;
    }

    let stem = artifact_stem(&cmd.document.file);
    let artifacts: [(PathBuf, &[u8]); 3] = [
        (
            cmd.out_dir.join(format!("{stem}.raw.txt")),
            document.text.as_bytes(),
        ),
        (
            cmd.out_dir.join(format!("{stem}.structure.json")),
            structure_json.as_slice(),
        ),
        (
            cmd.out_dir.join(format!("{stem}.records.json")),
            records_json.as_slice(),
        ),
    ];

    for (path, contents) in &artifacts {
        if let Err(e) = fs::write(path, contents) {
            eprintln!("error: failed to write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    println!(
        "Structured {}: {} subtopics, {} chapters, {} patterns",
        structured.topic.name,
        structured.topic.subtopics.len(),
        records.len(),
        structured.patterns.len()
    );
    for (path, _) in &artifacts {
        println!("Created {}", path.display());
    }

    ExitCode::SUCCESS
}
