//! Record sinks for folio.
//!
//! A [`Sink`] durably stores batches of [`ChapterRecord`]s. The [`BatchWriter`] partitions a
//! record list into fixed-size batches and calls the sink once per batch, sequentially. The
//! first failed batch aborts the run; earlier batches stay written, and the error reports a
//! [`Checkpoint`] from which the run can be resumed.

#![warn(missing_docs)]

mod error;
mod jsonl;
mod memory;
mod writer;

pub use error::SinkError;
pub use folio_document::ChapterRecord;
pub use jsonl::{JsonLinesSink, read_checkpoint, read_records};
pub use memory::MemorySink;
pub use writer::{BatchWriter, Checkpoint, DEFAULT_BATCH_SIZE, WriteReport};

/// A destination for batches of chapter records.
pub trait Sink {
    /// Durably writes one batch.
    ///
    /// Returning an error means no record of the batch should be considered written.
    fn write_batch(&mut self, batch: &[ChapterRecord]) -> Result<(), SinkError>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_batch(&mut self, batch: &[ChapterRecord]) -> Result<(), SinkError> {
        (**self).write_batch(batch)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_batch(&mut self, batch: &[ChapterRecord]) -> Result<(), SinkError> {
        (**self).write_batch(batch)
    }
}
