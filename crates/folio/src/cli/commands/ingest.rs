//! Implementation of `folio ingest`.

use std::process::ExitCode;

use folio_document::flatten_topic;
use folio_sink::{BatchWriter, Checkpoint, JsonLinesSink, SinkError, read_checkpoint};

use super::shared::{load_input, structure_input};
use crate::cli::{args::IngestCommand, context::CommandContext, output::dim};

/// Writes a document's chapter records to a JSON Lines sink in sequential batches.
pub fn run(ctx: &CommandContext, cmd: &IngestCommand) -> ExitCode {
    let batch_size = cmd.batch_size.unwrap_or(ctx.config.sink.batch_size);
    let writer = match BatchWriter::new(batch_size) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

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

    let opened = if cmd.resume {
        read_checkpoint(&cmd.sink, &records)
            .and_then(|from| JsonLinesSink::append(&cmd.sink).map(|sink| (sink, from)))
    } else {
        JsonLinesSink::create(&cmd.sink).map(|sink| (sink, Checkpoint::default()))
    };
    let (mut sink, from) = match opened {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("error: {e}");
            report_checkpoint(&e, records.len());
            return ExitCode::FAILURE;
        }
    };

    if from.committed > 0 {
        println!(
            "{}",
            dim(&format!(
                "resuming after {} of {} records",
                from.committed,
                records.len()
            ))
        );
    }

    match writer.resume(&mut sink, &records, from) {
        Ok(report) => {
            println!(
                "Wrote {} records in {} batches to {}",
                report.records,
                report.batches,
                sink.path().display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            report_checkpoint(&e, records.len());
            ExitCode::FAILURE
        }
    }
}

/// Tells the user how far a failed run got and how to finish it.
fn report_checkpoint(error: &SinkError, total: usize) {
    match error {
        SinkError::BatchFailed { committed, .. } => {
            eprintln!(
                "{committed} of {total} records committed; rerun with --resume to write the rest"
            );
        }
        SinkError::CheckpointOutOfRange { .. } => {
            eprintln!("the sink file holds more records than this document produces");
        }
        SinkError::ForeignRecords { .. } => {
            eprintln!(
                "the sink file was written for other records; rerun without --resume to replace it"
            );
        }
        _ => {}
    }
}
