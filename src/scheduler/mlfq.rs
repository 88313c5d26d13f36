/*!
 * Multilevel Feedback Queue
 * Level quanta double per level; demotion on quantum exhaustion, promotion
 * back to the top only via I/O completion
 */

use super::queue;
use super::traits::Scheduler;
use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{Pid, Tick};
use crate::process::table::ProcessTable;
use log::debug;
use std::collections::VecDeque;

/// `num_queues` FIFO levels. New and I/O-returning processes enter level 0;
/// a process that uses its whole quantum without blocking or terminating is
/// demoted one level, bottoming out at `num_queues - 1`. The quantum at
/// level L is `base_quantum * 2^L`.
#[derive(Debug)]
pub struct MlfqScheduler {
    queues: Vec<VecDeque<Pid>>,
    blocked: Vec<Pid>,
    just_blocked: Vec<Pid>,
    terminated: Vec<Pid>,
    /// Running process and the level it was drawn from
    current: Option<(Pid, usize)>,
    used: Tick,
    base_quantum: Tick,
}

impl MlfqScheduler {
    pub fn new(base_quantum: Tick, num_queues: usize) -> SimResult<Self> {
        if base_quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        if num_queues == 0 {
            return Err(ConfigError::ZeroQueues);
        }
        Ok(Self {
            queues: vec![VecDeque::new(); num_queues],
            blocked: Vec::new(),
            just_blocked: Vec::new(),
            terminated: Vec::new(),
            current: None,
            used: 0,
            base_quantum,
        })
    }

    fn quantum_at(&self, level: usize) -> Tick {
        let factor = 1u64.checked_shl(level as u32).unwrap_or(u64::MAX);
        self.base_quantum.saturating_mul(factor)
    }

    fn contains(&self, pid: Pid) -> bool {
        self.current.map(|(p, _)| p) == Some(pid)
            || self.queues.iter().any(|q| q.contains(&pid))
            || self.blocked.contains(&pid)
            || self.just_blocked.contains(&pid)
            || self.terminated.contains(&pid)
    }

    fn remove_from_queues(&mut self, pid: Pid) {
        for q in &mut self.queues {
            q.retain(|&p| p != pid);
        }
    }
}

impl Scheduler for MlfqScheduler {
    fn name(&self) -> &'static str {
        "mlfq"
    }

    fn add(&mut self, pid: Pid) {
        if !self.contains(pid) {
            self.queues[0].push_back(pid);
        }
    }

    fn block(&mut self, pid: Pid) {
        if self.current.map(|(p, _)| p) == Some(pid) {
            self.current = None;
            self.used = 0;
        }
        self.remove_from_queues(pid);
        if !self.blocked.contains(&pid) && !self.just_blocked.contains(&pid) {
            self.just_blocked.push(pid);
        }
    }

    fn reconcile_io(&mut self, table: &mut ProcessTable) {
        // I/O completion resets a process to the top level
        for pid in queue::drain_completed_io(&mut self.blocked, table) {
            self.queues[0].push_back(pid);
        }
        self.blocked.append(&mut self.just_blocked);
    }

    fn age(&mut self, table: &mut ProcessTable) {
        for q in &self.queues {
            for &pid in q {
                if let Some(p) = table.get_mut(pid) {
                    p.waiting_time += 1;
                }
            }
        }
    }

    fn terminate(&mut self, pid: Pid, tick: Tick, table: &mut ProcessTable) {
        if self.current.map(|(p, _)| p) == Some(pid) {
            self.current = None;
            self.used = 0;
        }
        self.remove_from_queues(pid);
        self.blocked.retain(|&p| p != pid);
        self.just_blocked.retain(|&p| p != pid);
        if let Some(p) = table.get_mut(pid) {
            p.state = crate::process::types::ProcessState::Terminated;
            p.completion_time = Some(tick);
        }
        if !self.terminated.contains(&pid) {
            self.terminated.push(pid);
        }
    }

    fn select(&mut self, _table: &ProcessTable) -> Option<Pid> {
        if let Some((pid, level)) = self.current {
            if self.used >= self.quantum_at(level) {
                let demoted = (level + 1).min(self.queues.len() - 1);
                debug!("mlfq: process {pid} demoted from level {level} to {demoted}");
                self.queues[demoted].push_back(pid);
                self.current = None;
                self.used = 0;
            }
        }
        if self.current.is_none() {
            for level in 0..self.queues.len() {
                if let Some(pid) = self.queues[level].pop_front() {
                    self.current = Some((pid, level));
                    self.used = 0;
                    break;
                }
            }
        }
        if self.current.is_some() {
            self.used += 1;
        }
        self.current.map(|(pid, _)| pid)
    }

    fn terminated(&self) -> &[Pid] {
        &self.terminated
    }

    fn reset(&mut self) {
        for q in &mut self.queues {
            q.clear();
        }
        self.blocked.clear();
        self.just_blocked.clear();
        self.terminated.clear();
        self.current = None;
        self.used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::pcb::Pcb;
    use crate::process::types::ProcessState;
    use std::collections::BTreeMap;

    fn table(specs: &[(Pid, Tick)]) -> ProcessTable {
        let mut t = ProcessTable::new();
        for &(pid, burst) in specs {
            t.insert(Pcb::new(pid, 1, burst, BTreeMap::new(), 0).unwrap())
                .unwrap();
        }
        t
    }

    #[test]
    fn test_demotion_on_quantum_exhaustion() {
        let table = table(&[(1, 20), (2, 20)]);
        let mut sched = MlfqScheduler::new(1, 2).unwrap();
        sched.add(1);
        sched.add(2);

        // Level 0 quantum is 1: processes alternate, each demoted after one
        // tick; at level 1 (quantum 2) they run two ticks apiece.
        let picks: Vec<_> = (0..6).map(|_| sched.select(&table)).collect();
        assert_eq!(
            picks,
            vec![Some(1), Some(2), Some(1), Some(1), Some(2), Some(2)]
        );
    }

    #[test]
    fn test_bottom_level_is_sticky() {
        let table = table(&[(1, 50)]);
        let mut sched = MlfqScheduler::new(1, 3).unwrap();
        sched.add(1);

        // Alone in the scheduler, the process is demoted to the bottom and
        // then rotates in place there.
        for _ in 0..20 {
            assert_eq!(sched.select(&table), Some(1));
        }
    }

    #[test]
    fn test_io_completion_promotes_to_top_level() {
        let mut table = ProcessTable::new();
        let mut p = Pcb::new(1, 1, 6, [(1u64, 1u64)].into_iter().collect(), 0).unwrap();
        p.execute_unit(0);
        p.start_io();
        table.insert(p).unwrap();
        table
            .insert(Pcb::new(2, 1, 20, BTreeMap::new(), 0).unwrap())
            .unwrap();

        let mut sched = MlfqScheduler::new(1, 2).unwrap();
        sched.block(1);
        sched.add(2);

        // Drive pid 2 down to level 1 while pid 1 finishes its I/O
        sched.reconcile_io(&mut table); // graduates pid 1 into the countdown
        assert_eq!(sched.select(&table), Some(2));
        sched.reconcile_io(&mut table); // countdown hits 0, pid 1 -> level 0
        assert_eq!(table.get(1).unwrap().state, ProcessState::Ready);

        // pid 2's level-0 quantum expires; pid 1 is picked from the top
        assert_eq!(sched.select(&table), Some(1));
    }
}
