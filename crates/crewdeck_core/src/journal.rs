//! Append-only transaction journal sinks.
//!
//! # Responsibility
//! - Record one human-readable line per completed mutation.
//! - Keep the sink behind a trait so callers and tests can choose between
//!   file-backed and in-memory records.
//!
//! # Invariants
//! - Records are append-only and ordered by operation completion.
//! - The journal is write-only from the core's perspective; nothing in the
//!   program reads it back.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub type JournalResult<T> = Result<T, JournalError>;

/// Persistence failure while appending a record.
///
/// Surfacing this error never alters in-memory entity state; the mutation
/// that produced the record stands.
#[derive(Debug)]
pub enum JournalError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to append to journal `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Ordered, append-only sink for mutation records.
pub trait TransactionLog {
    /// Appends one record followed by a record terminator.
    fn append(&mut self, message: &str) -> JournalResult<()>;
}

/// File-backed journal: one line per record, never truncated.
#[derive(Debug)]
pub struct FileTransactionLog {
    path: PathBuf,
}

impl FileTransactionLog {
    /// Creates a journal writing to `path`. The file is created on first
    /// append if missing; existing records are preserved across runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionLog for FileTransactionLog {
    fn append(&mut self, message: &str) -> JournalResult<()> {
        // Opened per append so each record reaches the file before the
        // operation reports success.
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| JournalError::Io {
                path: self.path.clone(),
                source,
            })?;
        writeln!(file, "{message}").map_err(|source| JournalError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory journal for tests and callers that do not persist.
#[derive(Debug, Default)]
pub struct MemoryTransactionLog {
    records: Vec<String>,
}

impl MemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all records in append order.
    pub fn records(&self) -> &[String] {
        &self.records
    }
}

impl TransactionLog for MemoryTransactionLog {
    fn append(&mut self, message: &str) -> JournalResult<()> {
        self.records.push(message.to_string());
        Ok(())
    }
}
