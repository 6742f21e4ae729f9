//! The action a scheduler tick produced

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exactly one of these is produced per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    /// Nothing eligible to run
    Idle,
    /// Newly arrived processes settled into the ready queue
    Admit,
    /// A completed I/O operation returned its process to the ready queue
    Interrupt,
    /// A ready process was placed on the CPU
    Dispatch,
    /// The running process kept the CPU
    Continue,
    /// The running process issued an I/O request and blocked
    IoBlock,
    /// The running process finished
    Finish,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Idle => write!(f, "idle"),
            StepAction::Admit => write!(f, "admit"),
            StepAction::Interrupt => write!(f, "interrupt"),
            StepAction::Dispatch => write!(f, "dispatch"),
            StepAction::Continue => write!(f, "continue"),
            StepAction::IoBlock => write!(f, "io_block"),
            StepAction::Finish => write!(f, "finish"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde_names() {
        for action in [
            StepAction::Idle,
            StepAction::Admit,
            StepAction::Interrupt,
            StepAction::Dispatch,
            StepAction::Continue,
            StepAction::IoBlock,
            StepAction::Finish,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action));
        }
    }
}
