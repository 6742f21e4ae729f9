//! Identifiers for simulated processes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a simulated process
///
/// Ids are handed out by the loader in input order unless the input names
/// them explicitly, and are never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(u64);

impl ProcessId {
    /// Creates a process ID from its raw value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProcessId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
