/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::{Pid, Priority, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for simulator construction and configuration
pub type SimResult<T> = Result<T, ConfigError>;

/// Configuration errors, rejected before a run starts
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Process {0} has zero burst time")]
    #[diagnostic(
        code(config::zero_burst),
        help("Every process needs at least one CPU tick of work.")
    )]
    ZeroBurst(Pid),

    #[error("Process {pid} has priority {priority}, minimum is 1")]
    #[diagnostic(
        code(config::invalid_priority),
        help("Priorities start at 1; lower values are more urgent.")
    )]
    InvalidPriority { pid: Pid, priority: Priority },

    #[error("Process {pid}: I/O threshold {threshold} outside (0, {burst})")]
    #[diagnostic(
        code(config::io_threshold_out_of_range),
        help("An I/O request must fire strictly inside the CPU burst.")
    )]
    IoThresholdOutOfRange { pid: Pid, threshold: Tick, burst: Tick },

    #[error("Process {pid}: I/O at threshold {threshold} has zero duration")]
    #[diagnostic(
        code(config::zero_io_duration),
        help("I/O operations must block for at least one tick.")
    )]
    ZeroIoDuration { pid: Pid, threshold: Tick },

    #[error("Duplicate process ID {0}")]
    #[diagnostic(
        code(config::duplicate_pid),
        help("Process IDs must be unique within a simulation.")
    )]
    DuplicatePid(Pid),

    #[error("Time quantum must be positive")]
    #[diagnostic(
        code(config::zero_quantum),
        help("RoundRobin and MLFQ need a quantum of at least one tick.")
    )]
    ZeroQuantum,

    #[error("MLFQ needs at least one queue level")]
    #[diagnostic(code(config::zero_queues), help("Use num_queues >= 1."))]
    ZeroQueues,

    #[error("Aging factor must be positive")]
    #[diagnostic(
        code(config::zero_aging_factor),
        help("The aging divisor cannot be zero.")
    )]
    ZeroAgingFactor,
}
