//! # Scheduler Reporter
//!
//! Renders what the simulation did. Reporters are sinks: they see the
//! loaded processes once, a [`TickRecord`] per tick and a [`RunSummary`] at the end, and they never
//! touch scheduler state.
//!
//! ## Philosophy
//!
//! - **Rendering is a host concern**: the scheduler never prints
//! - **Formatting is pure**: [`format_tick_line`] and friends are plain
//!   functions, testable without any output stream
//! - **Replaceable**: text, JSON lines and in-memory recording all sit
//!   behind the same [`Reporter`] trait

pub mod console;
pub mod format;
pub mod json;

pub use console::ConsoleReporter;
pub use format::{action_label, format_summary, format_tick_line, render_process_table, state_char};
pub use json::{JsonLinesReporter, RecordingReporter, RunTrace};

use sim_scheduler::{RunSummary, SimContext, TickRecord};
use thiserror::Error;

/// Reporter error types
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sink for simulation output
pub trait Reporter {
    /// Called once before the first tick
    fn start(&mut self, _ctx: &SimContext) -> Result<(), ReportError> {
        Ok(())
    }

    /// Called once per tick, in tick order
    fn report(&mut self, record: &TickRecord) -> Result<(), ReportError>;

    /// Called once after the last tick
    fn finish(&mut self, _summary: &RunSummary) -> Result<(), ReportError> {
        Ok(())
    }
}
