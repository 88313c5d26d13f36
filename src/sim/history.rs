/*!
 * Execution History
 * Tick-indexed record of which process held the CPU
 */

use crate::core::types::{Pid, Tick};
use crate::process::types::ProcessState;
use serde::{Deserialize, Serialize};

/// One tick of history: the process that ran (if any) and its
/// post-execution state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TickEntry {
    pub tick: Tick,
    pub pid: Option<Pid>,
    pub state: Option<ProcessState>,
}

impl TickEntry {
    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }
}

/// Append-only, strictly tick-ordered run history. Exactly one entry per
/// simulated tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionHistory {
    entries: Vec<TickEntry>,
}

impl ExecutionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, pid: Option<Pid>, state: Option<ProcessState>) {
        debug_assert!(self.entries.last().map_or(true, |e| e.tick < tick));
        self.entries.push(TickEntry { tick, pid, state });
    }

    pub fn entries(&self) -> &[TickEntry] {
        &self.entries
    }

    /// Sequence of pids over time, idle ticks as None.
    pub fn pids(&self) -> impl Iterator<Item = Option<Pid>> + '_ {
        self.entries.iter().map(|e| e.pid)
    }

    pub fn busy_ticks(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_idle()).count()
    }

    pub fn idle_ticks(&self) -> usize {
        self.entries.len() - self.busy_ticks()
    }

    /// Number of times the CPU changed hands between two busy ticks.
    pub fn context_switches(&self) -> u64 {
        let mut switches = 0;
        let mut last: Option<Pid> = None;
        for entry in &self.entries {
            if let Some(pid) = entry.pid {
                if last.is_some() && last != Some(pid) {
                    switches += 1;
                }
                last = Some(pid);
            }
        }
        switches
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
