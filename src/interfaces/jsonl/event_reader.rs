use crate::domain::transfer::TransferEvent;
use std::io::{BufRead, BufReader, Read};
use thiserror::Error;

/// A line that could not be turned into a transfer event.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("event read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed event: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads transfer events from a JSON-lines source, one event per line.
///
/// Wraps any `Read` source and yields `Result<TransferEvent>` lazily, so a
/// large event file streams without loading into memory. Blank lines are
/// skipped; a malformed line yields an error and reading continues.
pub struct EventReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g. File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes events.
    pub fn events(self) -> impl Iterator<Item = Result<TransferEvent, ReadError>> {
        self.reader.lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(serde_json::from_str(&line).map_err(ReadError::Parse)),
            Err(e) => Some(Err(ReadError::Io(e))),
        })
    }
}
