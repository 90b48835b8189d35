//! Sequential batch writing.
//!
//! Records are partitioned into fixed-size batches and handed to the sink one batch at a time,
//! in record order. Each call completes before the next is issued.

use folio_document::ChapterRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{Sink, SinkError};

/// Default number of records per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Number of leading records known to be durably written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Records committed, counted from the start of the record list.
    pub committed: usize,
}

/// Summary of a completed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Sink calls made by this run.
    pub batches: usize,
    /// Records written by this run.
    pub records: usize,
    /// Watermark after the run; equals the record count on success.
    pub checkpoint: Checkpoint,
}

/// Drives a [`Sink`] over a record list in fixed-size batches.
#[derive(Debug, Clone, Copy)]
pub struct BatchWriter {
    /// Maximum records per sink call.
    batch_size: usize,
}

impl Default for BatchWriter {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BatchWriter {
    /// Creates a writer with the given batch size.
    pub fn new(batch_size: usize) -> Result<Self, SinkError> {
        if batch_size == 0 {
            return Err(SinkError::InvalidBatchSize);
        }
        Ok(Self { batch_size })
    }

    /// Returns the batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Writes every record, aborting on the first failed batch.
    pub fn write_all<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
        records: &[ChapterRecord],
    ) -> Result<WriteReport, SinkError> {
        self.resume(sink, records, Checkpoint::default())
    }

    /// Writes the records after `from`, aborting on the first failed batch.
    ///
    /// There is no retry and no rollback. On failure the returned
    /// [`SinkError::BatchFailed`] carries the checkpoint to pass back here.
    pub fn resume<S: Sink + ?Sized>(
        &self,
        sink: &mut S,
        records: &[ChapterRecord],
        from: Checkpoint,
    ) -> Result<WriteReport, SinkError> {
        let Some(pending) = records.get(from.committed..) else {
            return Err(SinkError::CheckpointOutOfRange {
                committed: from.committed,
                total: records.len(),
            });
        };

        let mut committed = from.committed;
        let mut batches = 0;
        for (index, batch) in pending.chunks(self.batch_size).enumerate() {
            if let Err(source) = sink.write_batch(batch) {
                warn!(batch = index + 1, committed, error = %source, "batch write failed");
                return Err(SinkError::BatchFailed {
                    batch: index + 1,
                    committed,
                    source: Box::new(source),
                });
            }
            committed += batch.len();
            batches += 1;
            debug!(batch = index + 1, size = batch.len(), committed, "wrote batch");
        }

        info!(
            batches,
            records = committed - from.committed,
            total = records.len(),
            "finished writing records"
        );
        Ok(WriteReport {
            batches,
            records: committed - from.committed,
            checkpoint: Checkpoint { committed },
        })
    }
}

#[cfg(test)]
mod tests {
    use folio_document::{Document, StructureOptions, flatten_topic, structure_document};

    use super::*;
    use crate::MemorySink;

    fn records(n: usize) -> Vec<ChapterRecord> {
        let mut text = String::new();
        for i in 0..n {
            text.push_str(&format!("# Section {i}\nbody {i}\n"));
        }
        let doc = Document::new("Book", 4, text);
        let structured = structure_document(&doc, &StructureOptions::default()).unwrap();
        flatten_topic(&structured.topic)
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(matches!(BatchWriter::new(0), Err(SinkError::InvalidBatchSize)));
    }

    #[test]
    fn test_default_batch_size() {
        assert_eq!(BatchWriter::default().batch_size(), 50);
    }

    #[test]
    fn test_partitions_in_order() {
        let records = records(120);
        let mut sink = MemorySink::new();

        let report = BatchWriter::default().write_all(&mut sink, &records).unwrap();

        assert_eq!(report.batches, 3);
        assert_eq!(report.records, 120);
        assert_eq!(report.checkpoint.committed, 120);
        let sizes: Vec<usize> = sink.batches().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert_eq!(sink.records(), records);
    }

    #[test]
    fn test_empty_records_make_no_calls() {
        let mut sink = MemorySink::new();
        let report = BatchWriter::default().write_all(&mut sink, &[]).unwrap();
        assert_eq!(report.batches, 0);
        assert_eq!(sink.calls(), 0);
    }

    #[test]
    fn test_first_failure_aborts_run() {
        let records = records(10);
        let mut sink = MemorySink::failing_at(1);

        let err = BatchWriter::new(4)
            .unwrap()
            .write_all(&mut sink, &records)
            .unwrap_err();

        assert!(matches!(err, SinkError::BatchFailed { batch: 2, committed: 4, .. }));
        assert_eq!(err.checkpoint(), Some(Checkpoint { committed: 4 }));
        // no further batches were attempted and the first one stays written
        assert_eq!(sink.calls(), 2);
        assert_eq!(sink.records(), records[..4].to_vec());
    }

    #[test]
    fn test_resume_from_checkpoint() {
        let records = records(10);
        let writer = BatchWriter::new(4).unwrap();
        let mut sink = MemorySink::failing_at(1);

        let checkpoint = writer
            .write_all(&mut sink, &records)
            .unwrap_err()
            .checkpoint()
            .unwrap();
        sink.clear_failure();
        let report = writer.resume(&mut sink, &records, checkpoint).unwrap();

        assert_eq!(report.records, 6);
        assert_eq!(report.batches, 2);
        assert_eq!(report.checkpoint.committed, 10);
        assert_eq!(sink.records(), records);
    }

    #[test]
    fn test_resume_beyond_end_is_rejected() {
        let records = records(3);
        let mut sink = MemorySink::new();
        let err = BatchWriter::default()
            .resume(&mut sink, &records, Checkpoint { committed: 4 })
            .unwrap_err();
        assert!(matches!(
            err,
            SinkError::CheckpointOutOfRange {
                committed: 4,
                total: 3
            }
        ));
    }

    #[test]
    fn test_resume_at_end_is_noop() {
        let records = records(3);
        let mut sink = MemorySink::new();
        let report = BatchWriter::default()
            .resume(&mut sink, &records, Checkpoint { committed: 3 })
            .unwrap();
        assert_eq!(report.batches, 0);
        assert_eq!(sink.calls(), 0);
    }
}
