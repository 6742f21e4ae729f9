//! # Core Types
//!
//! This crate defines the passive data shared by every part of the scheduler
//! simulator.
//!
//! ## Philosophy
//!
//! - **Data, not behavior**: Nothing here decides anything. The scheduler core
//!   owns every state transition.
//! - **Closed vocabularies**: Process states and step actions are enums, so a
//!   new variant is a compile error everywhere it matters.
//! - **Serializable**: Every type round-trips through serde for traces.
//!
//! ## Key Types
//!
//! - [`ProcessId`]: Stable identifier assigned at load time
//! - [`ProcessDescriptor`]: A validated input record
//! - [`Process`]: The live process record mutated by the scheduler
//! - [`ProcessState`]: `new`, `ready`, `processing`, `blocked`, `done`
//! - [`StepAction`]: The single action a tick produced

pub mod action;
pub mod ids;
pub mod process;

pub use action::StepAction;
pub use ids::ProcessId;
pub use process::{IoEvent, Process, ProcessDescriptor, ProcessState};
