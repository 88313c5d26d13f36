/*!
 * Process Types
 * Common types for the process lifecycle
 */

use serde::{Deserialize, Serialize};

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Eligible for the CPU, waiting in a ready structure
    Ready,
    /// Occupies the CPU
    Running,
    /// Performing I/O
    Blocked,
    /// Finished all CPU work; absorbing
    Terminated,
}

impl ProcessState {
    /// Whether the process can still make progress
    pub fn is_live(self) -> bool {
        self != ProcessState::Terminated
    }
}
