/*!
 * schedsim
 * Deterministic tick-driven CPU scheduling simulator: a process state
 * machine, a family of pluggable scheduling policies, and a single-CPU
 * discrete-time engine that records an analyzable execution history.
 */

pub mod core;
pub mod gen;
pub mod process;
pub mod scheduler;
pub mod sim;

// Re-exports
pub use crate::core::{ConfigError, Pid, Priority, SimResult, Tick};
pub use gen::{WorkloadConfig, WorkloadGenerator};
pub use process::{Interval, Pcb, ProcessState, ProcessTable};
pub use scheduler::{
    DynamicPriorityScheduler, MlfqScheduler, Policy, PriorityScheduler, RoundRobinScheduler,
    Scheduler, SjfScheduler, SrtfScheduler,
};
pub use sim::{ExecutionHistory, ProcessSummary, RunReport, SimStats, Simulation, TickEntry};
