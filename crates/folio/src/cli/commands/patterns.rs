//! Implementation of `folio patterns`.

use std::process::ExitCode;

use super::shared::{load_file, structure_input};
use crate::cli::{
    args::PatternsCommand,
    context::CommandContext,
    output::{dim, print_json},
};

/// Lists the heading first words that recur more often than the threshold.
pub fn run(ctx: &CommandContext, cmd: &PatternsCommand) -> ExitCode {
    let document = match load_file(&cmd.file, 0, None) {
        Ok(document) => document,
        Err(code) => return code,
    };

    let mut options = ctx.config.structure_options();
    if let Some(threshold) = cmd.threshold {
        options.pattern_threshold = threshold;
    }
    let structured = match structure_input(&document, &options) {
        Ok(structured) => structured,
        Err(code) => return code,
    };

    if cmd.json {
        return print_json(&structured.patterns);
    }

    if structured.patterns.is_empty() {
        println!(
            "{}",
            dim(&format!(
                "no heading word occurs more than {} times",
                options.pattern_threshold
            ))
        );
        return ExitCode::SUCCESS;
    }

    let width = structured
        .patterns
        .iter()
        .map(|p| p.word.len())
        .max()
        .unwrap_or(0);
    for pattern in &structured.patterns {
        println!("{:<width$}  {}", pattern.word, pattern.count);
    }

    ExitCode::SUCCESS
}
