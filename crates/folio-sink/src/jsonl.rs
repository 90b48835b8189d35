//! JSON Lines file sink.
//!
//! Each record is written as one JSON object per line. A batch is serialized completely before
//! any of it reaches the file, and the file is flushed after every batch. The committed
//! watermark is the number of complete lines, and only counts when those lines are the leading
//! records of the list being resumed.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use folio_document::ChapterRecord;

use crate::{Checkpoint, Sink, SinkError};

/// Appends records to a `.jsonl` file.
#[derive(Debug)]
pub struct JsonLinesSink {
    /// Path of the output file.
    path: PathBuf,
    /// Buffered handle to the output file.
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Creates (or truncates) the output file.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| io_error(path, source))?;
        Ok(Self::from_file(path, file))
    }

    /// Opens the output file for appending, creating it if necessary.
    pub fn append(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| io_error(path, source))?;
        Ok(Self::from_file(path, file))
    }

    /// Wraps an open file.
    fn from_file(path: &Path, file: File) -> Self {
        Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        }
    }

    /// Returns the output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for JsonLinesSink {
    fn write_batch(&mut self, batch: &[ChapterRecord]) -> Result<(), SinkError> {
        let mut buf = Vec::new();
        for record in batch {
            serde_json::to_writer(&mut buf, record)
                .map_err(|source| SinkError::Serialize { source })?;
            buf.push(b'\n');
        }
        self.writer
            .write_all(&buf)
            .and_then(|()| self.writer.flush())
            .map_err(|source| io_error(&self.path, source))
    }
}

/// Reads the committed watermark of an existing JSON Lines file written for `expected`.
///
/// A missing file has committed nothing. Every non-empty line must be a complete record equal
/// to the record at the same position in `expected`, and the file must end with a newline.
pub fn read_checkpoint(path: &Path, expected: &[ChapterRecord]) -> Result<Checkpoint, SinkError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Checkpoint::default()),
        Err(source) => return Err(io_error(path, source)),
    };
    if !content.is_empty() && !content.ends_with('\n') {
        return Err(SinkError::TornWrite {
            path: path.to_path_buf(),
        });
    }

    let mut committed = 0;
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: ChapterRecord =
            serde_json::from_str(line).map_err(|source| SinkError::CorruptLine {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
        match expected.get(committed) {
            Some(want) if *want == record => committed += 1,
            Some(_) => {
                return Err(SinkError::ForeignRecords {
                    path: path.to_path_buf(),
                    record: committed + 1,
                });
            }
            None => {
                return Err(SinkError::CheckpointOutOfRange {
                    committed: committed + 1,
                    total: expected.len(),
                });
            }
        }
    }
    Ok(Checkpoint { committed })
}

/// Reads every record from a JSON Lines file.
pub fn read_records(path: &Path) -> Result<Vec<ChapterRecord>, SinkError> {
    let content = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(|source| SinkError::Serialize { source }))
        .collect()
}

/// Builds an I/O error for `path`.
fn io_error(path: &Path, source: io::Error) -> SinkError {
    SinkError::Io {
        path: path.to_path_buf(),
        source,
    }
}
