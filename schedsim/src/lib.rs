//! # Scheduler Simulator Host
//!
//! Loads a process list, drives the simulation one tick at a time, paces
//! the ticks against the wall clock and hands every tick to a reporter.
//!
//! ## Responsibilities
//!
//! - Parse the command line into a [`SimRuntimeConfig`]
//! - Load and validate the process list before the first tick
//! - Poll the termination predicate once per tick
//! - Route records to the console, JSON lines, and an optional trace file
//!
//! ## Non-Responsibilities
//!
//! The host does NOT make scheduling decisions or mutate process state.

pub mod args;
pub mod runtime;

pub use args::{parse_args, usage};
pub use runtime::{OutputFormat, SimRuntime, SimRuntimeConfig, SimRuntimeError};
