/*!
 * Process Control Block
 * The stateful entity representing one simulated process
 */

use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{Pid, Priority, Tick};
use crate::process::interval::{self, Interval};
use crate::process::types::ProcessState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Process control block.
///
/// Invariant: `remaining_time == burst_time - executed_time` at all times.
/// State changes only through the lifecycle methods below; the simulation
/// engine is the sole caller during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Pcb {
    pub pid: Pid,
    pub static_priority: Priority,
    /// Derived from static priority and accumulated wait via aging
    pub dynamic_priority: Priority,
    pub burst_time: Tick,
    pub remaining_time: Tick,
    /// Executed-time threshold -> I/O duration, as configured
    io_map: BTreeMap<Tick, Tick>,
    /// Thresholds not yet consumed this run
    #[serde(skip)]
    pending_io: BTreeMap<Tick, Tick>,
    pub arrival_time: Tick,
    pub state: ProcessState,
    pub executed_time: Tick,
    pub waiting_time: Tick,
    pub io_remaining: Tick,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Tick>,
    /// Renderer-facing tag, assigned by the workload generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub execution_intervals: Vec<Interval>,
}

impl Pcb {
    /// Create a process record, rejecting invalid configuration up front.
    pub fn new(
        pid: Pid,
        priority: Priority,
        burst_time: Tick,
        io_map: BTreeMap<Tick, Tick>,
        arrival_time: Tick,
    ) -> SimResult<Self> {
        if burst_time == 0 {
            return Err(ConfigError::ZeroBurst(pid));
        }
        if priority == 0 {
            return Err(ConfigError::InvalidPriority { pid, priority });
        }
        for (&threshold, &duration) in &io_map {
            if threshold == 0 || threshold >= burst_time {
                return Err(ConfigError::IoThresholdOutOfRange {
                    pid,
                    threshold,
                    burst: burst_time,
                });
            }
            if duration == 0 {
                return Err(ConfigError::ZeroIoDuration { pid, threshold });
            }
        }

        Ok(Self {
            pid,
            static_priority: priority,
            dynamic_priority: priority,
            burst_time,
            remaining_time: burst_time,
            pending_io: io_map.clone(),
            io_map,
            arrival_time,
            state: ProcessState::Ready,
            executed_time: 0,
            waiting_time: 0,
            io_remaining: 0,
            completion_time: None,
            color: None,
            execution_intervals: Vec::new(),
        })
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Restore the record to its pre-run state.
    pub fn reset(&mut self) {
        self.dynamic_priority = self.static_priority;
        self.remaining_time = self.burst_time;
        self.pending_io = self.io_map.clone();
        self.state = ProcessState::Ready;
        self.executed_time = 0;
        self.waiting_time = 0;
        self.io_remaining = 0;
        self.completion_time = None;
        self.execution_intervals.clear();
    }

    /// Consume one CPU tick. Moves to Terminated when the burst is done.
    pub fn execute_unit(&mut self, tick: Tick) {
        self.state = ProcessState::Running;
        self.executed_time += 1;
        self.remaining_time -= 1;
        interval::push_tick(&mut self.execution_intervals, tick);

        if self.remaining_time == 0 {
            self.state = ProcessState::Terminated;
        }
    }

    /// Whether cumulative executed time has hit an unconsumed I/O threshold.
    pub fn io_due(&self) -> bool {
        self.pending_io.contains_key(&self.executed_time)
    }

    /// Consume the pending threshold and block for its duration.
    pub fn start_io(&mut self) {
        if let Some(duration) = self.pending_io.remove(&self.executed_time) {
            self.io_remaining = duration;
            self.state = ProcessState::Blocked;
        }
    }

    /// Count down one tick of I/O. Returns true when the wait is over.
    pub fn tick_io(&mut self) -> bool {
        if self.state != ProcessState::Blocked {
            return false;
        }
        self.io_remaining = self.io_remaining.saturating_sub(1);
        if self.io_remaining == 0 {
            self.state = ProcessState::Ready;
            return true;
        }
        false
    }

    /// Recompute dynamic priority from accumulated wait.
    pub fn update_dynamic_priority(&mut self, aging_factor: Tick) {
        let boost = (self.waiting_time / aging_factor) as Priority;
        self.dynamic_priority = self.static_priority.saturating_sub(boost).max(1);
    }

    /// Sum of all configured I/O durations.
    pub fn total_io_time(&self) -> Tick {
        self.io_map.values().sum()
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    /// completion_time - arrival_time, once terminated.
    pub fn turnaround_time(&self) -> Option<Tick> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    /// Delay between arrival and the first tick of CPU.
    pub fn response_time(&self) -> Option<Tick> {
        self.execution_intervals
            .first()
            .map(|iv| iv.start - self.arrival_time)
    }
}
