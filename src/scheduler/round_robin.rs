/*!
 * Round-Robin Scheduling
 * FIFO rotation with a fixed time quantum
 */

use super::queue::QueueCore;
use super::traits::Scheduler;
use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{Pid, Tick};
use crate::process::table::ProcessTable;
use log::debug;

/// FIFO scheduling where the running process keeps the CPU for at most
/// `time_quantum` consecutive ticks, then rotates to the queue tail.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    core: QueueCore,
    time_quantum: Tick,
    /// Consecutive ticks granted to the current process
    used: Tick,
}

impl RoundRobinScheduler {
    pub fn new(time_quantum: Tick) -> SimResult<Self> {
        if time_quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(Self {
            core: QueueCore::default(),
            time_quantum,
            used: 0,
        })
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "round_robin"
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

    fn select(&mut self, _table: &ProcessTable) -> Option<Pid> {
        if self.used >= self.time_quantum {
            if let Some(prev) = self.core.current.take() {
                debug!("round_robin: quantum expired for process {prev}");
                self.core.ready.push_back(prev);
            }
        }
        if self.core.current.is_none() {
            self.core.current = self.core.ready.pop_front();
            self.used = 0;
        }
        if self.core.current.is_some() {
            self.used += 1;
        }
        self.core.current
    }

    fn terminated(&self) -> &[Pid] {
        &self.core.terminated
    }

    fn reset(&mut self) {
        self.core.reset();
        self.used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::pcb::Pcb;
    use std::collections::BTreeMap;

    fn table(pids: &[Pid]) -> ProcessTable {
        let mut t = ProcessTable::new();
        for &pid in pids {
            t.insert(Pcb::new(pid, 1, 10, BTreeMap::new(), 0).unwrap())
                .unwrap();
        }
        t
    }

    #[test]
    fn test_rotates_after_quantum() {
        let table = table(&[1, 2]);
        let mut sched = RoundRobinScheduler::new(2).unwrap();
        sched.add(1);
        sched.add(2);

        assert_eq!(sched.select(&table), Some(1));
        assert_eq!(sched.select(&table), Some(1));
        assert_eq!(sched.select(&table), Some(2));
        assert_eq!(sched.select(&table), Some(2));
        assert_eq!(sched.select(&table), Some(1));
    }

    #[test]
    fn test_sole_process_keeps_cpu_across_quanta() {
        let table = table(&[1]);
        let mut sched = RoundRobinScheduler::new(2).unwrap();
        sched.add(1);

        for _ in 0..5 {
            assert_eq!(sched.select(&table), Some(1));
        }
    }

    #[test]
    fn test_zero_quantum_rejected() {
        assert!(matches!(
            RoundRobinScheduler::new(0),
            Err(ConfigError::ZeroQuantum)
        ));
    }
}
