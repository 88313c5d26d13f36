/*!
 * Shortest-Job Scheduling
 * SJF (total burst) and SRTF (remaining time, preemptive) policies
 */

use super::queue::{self, QueueCore};
use super::traits::Scheduler;
use crate::core::types::{Pid, Tick};
use crate::process::table::ProcessTable;
use log::debug;

/// Shortest Job First: lowest total `burst_time` among Ready processes,
/// FIFO on ties. Non-preemptive.
#[derive(Debug, Default)]
pub struct SjfScheduler {
    core: QueueCore,
}

impl SjfScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn add(&mut self, pid: Pid) {
        self.core.admit(pid);
    }

    fn block(&mut self, pid: Pid) {
        self.core.block(pid);
    }

    fn reconcile_io(&mut self, table: &mut ProcessTable) {
        for pid in self.core.drain_completed_io(table) {
            self.core.ready.push_back(pid);
        }
    }

    fn age(&mut self, table: &mut ProcessTable) {
        self.core.bump_waiting(table);
    }

    fn terminate(&mut self, pid: Pid, tick: Tick, table: &mut ProcessTable) {
        self.core.terminate(pid, tick, table);
    }

    fn select(&mut self, table: &ProcessTable) -> Option<Pid> {
        if self.core.current.is_none() {
            self.core.current = queue::take_min_by_key(&mut self.core.ready, table, |p| p.burst_time);
        }
        self.core.current
    }

    fn terminated(&self) -> &[Pid] {
        &self.core.terminated
    }

    fn reset(&mut self) {
        self.core.reset();
    }
}

/// Shortest Remaining Time First: re-evaluated every tick. A ready process
/// with strictly less remaining work preempts the incumbent; ties keep the
/// CPU where it is.
#[derive(Debug, Default)]
pub struct SrtfScheduler {
    core: QueueCore,
}

impl SrtfScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SrtfScheduler {
    fn name(&self) -> &'static str {
        "srtf"
    }

    fn add(&mut self, pid: Pid) {
        self.core.admit(pid);
    }

    fn block(&mut self, pid: Pid) {
        self.core.block(pid);
    }

    fn reconcile_io(&mut self, table: &mut ProcessTable) {
        for pid in self.core.drain_completed_io(table) {
            self.core.ready.push_back(pid);
        }
    }

    fn age(&mut self, table: &mut ProcessTable) {
        self.core.bump_waiting(table);
    }

    fn terminate(&mut self, pid: Pid, tick: Tick, table: &mut ProcessTable) {
        self.core.terminate(pid, tick, table);
    }

    fn select(&mut self, table: &ProcessTable) -> Option<Pid> {
        let challenger_idx =
            queue::min_position_by_key(&self.core.ready, table, |p| p.remaining_time);

        match (self.core.current, challenger_idx) {
            (Some(cur), Some(idx)) => {
                let cur_remaining = table.get(cur).map(|p| p.remaining_time);
                let challenger_remaining = self.core.ready.get(idx).and_then(|&pid| {
                    table.get(pid).map(|p| p.remaining_time)
                });
                if let (Some(cur_rem), Some(ch_rem)) = (cur_remaining, challenger_remaining) {
                    if ch_rem < cur_rem {
                        if let Some(pid) = self.core.ready.remove(idx) {
                            debug!("srtf: process {pid} preempts {cur}");
                            self.core.ready.push_back(cur);
                            self.core.current = Some(pid);
                        }
                    }
                }
                self.core.current
            }
            (Some(cur), None) => Some(cur),
            (None, Some(idx)) => {
                self.core.current = self.core.ready.remove(idx);
                self.core.current
            }
            (None, None) => None,
        }
    }

    fn terminated(&self) -> &[Pid] {
        &self.core.terminated
    }

    fn reset(&mut self) {
        self.core.reset();
    }
}
