//! In-memory sink.

use folio_document::ChapterRecord;

use crate::{Sink, SinkError};

/// Collects batches in memory, optionally rejecting one call.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Batches accepted so far.
    batches: Vec<Vec<ChapterRecord>>,
    /// 0-based call index to reject.
    fail_at: Option<usize>,
    /// Calls made, including rejected ones.
    calls: usize,
}

impl MemorySink {
    /// Creates a sink that accepts every batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that rejects the call with the given 0-based index.
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    /// Stops rejecting calls.
    pub fn clear_failure(&mut self) {
        self.fail_at = None;
    }

    /// Returns the accepted batches.
    pub fn batches(&self) -> &[Vec<ChapterRecord>] {
        &self.batches
    }

    /// Returns every accepted record in write order.
    pub fn records(&self) -> Vec<ChapterRecord> {
        self.batches.iter().flatten().cloned().collect()
    }

    /// Returns the number of `write_batch` calls received.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Sink for MemorySink {
    fn write_batch(&mut self, batch: &[ChapterRecord]) -> Result<(), SinkError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(SinkError::Rejected {
                reason: format!("call {call} rejected"),
            });
        }
        self.batches.push(batch.to_vec());
        Ok(())
    }
}
