/*!
 * Run Reporting
 * Read-only summary of a finished simulation
 */

use crate::core::types::{Pid, Priority, Tick};
use crate::process::table::ProcessTable;
use crate::process::types::ProcessState;
use crate::sim::history::ExecutionHistory;
use serde::{Deserialize, Serialize};

/// Counters the engine maintains during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// Times a still-runnable process lost the CPU to another
    pub preemptions: u64,
}

/// Per-process outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSummary {
    pub pid: Pid,
    pub state: ProcessState,
    pub static_priority: Priority,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub waiting_time: Tick,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Tick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnaround_time: Option<Tick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<Tick>,
}

/// Aggregate view of one run: averages over completed processes plus CPU
/// accounting over the simulated window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunReport {
    pub policy: String,
    pub total_ticks: usize,
    pub busy_ticks: usize,
    pub idle_ticks: usize,
    pub context_switches: u64,
    pub preemptions: u64,
    pub completed: usize,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    /// busy / total over the simulated window, 0.0 for an empty run
    pub cpu_utilization: f64,
    pub processes: Vec<ProcessSummary>,
}

impl RunReport {
    pub fn from_run(
        policy: &str,
        table: &ProcessTable,
        history: &ExecutionHistory,
        stats: SimStats,
    ) -> Self {
        let mut completed = 0usize;
        let mut total_waiting = 0u64;
        let mut total_turnaround = 0u64;
        let mut total_response = 0u64;

        let processes: Vec<ProcessSummary> = table
            .iter()
            .map(|p| {
                let turnaround = p.turnaround_time();
                if let Some(t) = turnaround {
                    completed += 1;
                    total_waiting += p.waiting_time;
                    total_turnaround += t;
                    total_response += p.response_time().unwrap_or(0);
                }
                ProcessSummary {
                    pid: p.pid,
                    state: p.state,
                    static_priority: p.static_priority,
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    waiting_time: p.waiting_time,
                    completion_time: p.completion_time,
                    turnaround_time: turnaround,
                    response_time: p.response_time(),
                }
            })
            .collect();

        let avg = |total: u64| {
            if completed == 0 {
                0.0
            } else {
                total as f64 / completed as f64
            }
        };
        let total_ticks = history.len();
        let busy_ticks = history.busy_ticks();

        Self {
            policy: policy.to_string(),
            total_ticks,
            busy_ticks,
            idle_ticks: history.idle_ticks(),
            context_switches: history.context_switches(),
            preemptions: stats.preemptions,
            completed,
            avg_waiting_time: avg(total_waiting),
            avg_turnaround_time: avg(total_turnaround),
            avg_response_time: avg(total_response),
            cpu_utilization: if total_ticks == 0 {
                0.0
            } else {
                busy_ticks as f64 / total_ticks as f64
            },
            processes,
        }
    }
}
