/*!
 * Simulation Module
 * Tick-loop engine, execution history, and run reporting
 */

pub mod engine;
pub mod history;
pub mod report;

pub use engine::Simulation;
pub use history::{ExecutionHistory, TickEntry};
pub use report::{ProcessSummary, RunReport, SimStats};
