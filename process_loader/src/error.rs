//! Loader error types

use core_types::ProcessId;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error raised while loading a process list
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid JSON process list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid process list: {0}")]
    Invalid(#[from] ValidationError),
}

/// A process record that the scheduler core cannot run
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Process {id}: CPU time must be positive")]
    ZeroCpuTime { id: ProcessId },

    #[error("Process {id}: I/O event {index} has zero duration")]
    ZeroIoDuration { id: ProcessId, index: usize },

    #[error("Process {id}: I/O offset {offset} must be less than CPU time {cpu_time}")]
    OffsetOutOfRange {
        id: ProcessId,
        offset: u64,
        cpu_time: u64,
    },

    #[error("Process {id}: I/O offsets out of order ({previous} then {offset})")]
    UnorderedOffsets {
        id: ProcessId,
        previous: u64,
        offset: u64,
    },

    #[error("Duplicate process id {0}")]
    DuplicateId(ProcessId),
}
