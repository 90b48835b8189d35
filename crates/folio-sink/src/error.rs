//! Error types for record sinks.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::Checkpoint;

/// Errors that can occur when writing records to a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to open or write a sink file.
    #[error("failed to write sink file {path}: {source}")]
    Io {
        /// Path to the sink file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to serialize a record.
    #[error("failed to serialize record: {source}")]
    Serialize {
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The storage backend refused a batch.
    #[error("sink rejected batch: {reason}")]
    Rejected {
        /// Reason reported by the backend.
        reason: String,
    },

    /// Batch size must be at least one record.
    #[error("batch size must be greater than zero")]
    InvalidBatchSize,

    /// A checkpoint points past the end of the record list.
    #[error("checkpoint at record {committed} is beyond the {total} records to write")]
    CheckpointOutOfRange {
        /// Records the checkpoint claims were committed.
        committed: usize,
        /// Records available to write.
        total: usize,
    },

    /// An existing sink file ends in a partially written line.
    #[error("sink file {path} ends in an incomplete line; truncate it to the last newline")]
    TornWrite {
        /// Path to the sink file.
        path: PathBuf,
    },

    /// A line of an existing sink file is not a chapter record.
    #[error("sink file {path} has an unreadable record on line {line}: {source}")]
    CorruptLine {
        /// Path to the sink file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// An existing sink file holds records that differ from the ones being written.
    #[error("sink file {path} does not match these records at record {record}")]
    ForeignRecords {
        /// Path to the sink file.
        path: PathBuf,
        /// 1-based index of the first differing record.
        record: usize,
    },

    /// A batch failed, aborting the run.
    ///
    /// Batches before this one have already been written and are not rolled back; `committed`
    /// is the watermark a caller can resume from.
    #[error("batch {batch} failed with {committed} records already committed: {source}")]
    BatchFailed {
        /// 1-based index of the failed batch within the run.
        batch: usize,
        /// Records durably written before the failure, counted from the start of the list.
        committed: usize,
        /// The sink's error.
        source: Box<SinkError>,
    },
}

impl SinkError {
    /// Returns the resume point for a failed run, if this error carries one.
    pub fn checkpoint(&self) -> Option<Checkpoint> {
        match self {
            Self::BatchFailed { committed, .. } => Some(Checkpoint {
                committed: *committed,
            }),
            _ => None,
        }
    }
}
