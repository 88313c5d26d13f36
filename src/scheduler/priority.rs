/*!
 * Priority Scheduling
 * Static priority and dynamic-priority (aging) policies
 */

use super::queue::{self, QueueCore};
use super::traits::Scheduler;
use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{Pid, Tick};
use crate::process::table::ProcessTable;

/// Fixed-priority scheduling: lowest `static_priority` wins, FIFO on ties.
/// Non-preemptive; the running process keeps the CPU until it blocks or
/// terminates.
#[derive(Debug, Default)]
pub struct PriorityScheduler {
    core: QueueCore,
}

impl PriorityScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        "priority"
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
            self.core.current =
                queue::take_min_by_key(&mut self.core.ready, table, |p| p.static_priority);
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

/// Priority scheduling with aging: effective priority is recomputed every
/// tick as `max(1, static_priority - waiting_time / aging_factor)`, so
/// long-waiting processes drift toward the front instead of starving.
#[derive(Debug)]
pub struct DynamicPriorityScheduler {
    core: QueueCore,
    aging_factor: Tick,
}

impl DynamicPriorityScheduler {
    pub fn new(aging_factor: Tick) -> SimResult<Self> {
        if aging_factor == 0 {
            return Err(ConfigError::ZeroAgingFactor);
        }
        Ok(Self {
            core: QueueCore::default(),
            aging_factor,
        })
    }
}

impl Scheduler for DynamicPriorityScheduler {
    fn name(&self) -> &'static str {
        "dynamic_priority"
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
        for &pid in &self.core.ready {
            if let Some(p) = table.get_mut(pid) {
                p.update_dynamic_priority(self.aging_factor);
            }
        }
    }

    fn terminate(&mut self, pid: Pid, tick: Tick, table: &mut ProcessTable) {
        self.core.terminate(pid, tick, table);
    }

    fn select(&mut self, table: &ProcessTable) -> Option<Pid> {
        if self.core.current.is_none() {
            self.core.current =
                queue::take_min_by_key(&mut self.core.ready, table, |p| p.dynamic_priority);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::pcb::Pcb;
    use std::collections::BTreeMap;

    fn table(specs: &[(Pid, u32, Tick)]) -> ProcessTable {
        let mut t = ProcessTable::new();
        for &(pid, priority, burst) in specs {
            t.insert(Pcb::new(pid, priority, burst, BTreeMap::new(), 0).unwrap())
                .unwrap();
        }
        t
    }

    #[test]
    fn test_lowest_priority_value_wins() {
        let table = table(&[(1, 5, 4), (2, 2, 4), (3, 8, 4)]);
        let mut sched = PriorityScheduler::new();
        sched.add(1);
        sched.add(2);
        sched.add(3);

        assert_eq!(sched.select(&table), Some(2));
        // Non-preemptive: same answer until the engine releases the CPU
        assert_eq!(sched.select(&table), Some(2));
    }

    #[test]
    fn test_priority_tie_keeps_fifo_order() {
        let table = table(&[(7, 3, 4), (8, 3, 4)]);
        let mut sched = PriorityScheduler::new();
        sched.add(7);
        sched.add(8);

        assert_eq!(sched.select(&table), Some(7));
    }

    #[test]
    fn test_aging_overtakes_static_order() {
        let mut table = table(&[(1, 2, 6), (2, 6, 6)]);
        let mut sched = DynamicPriorityScheduler::new(3).unwrap();
        sched.add(2);
        sched.add(1);

        // pid 2 has been waiting much longer than pid 1
        table.get_mut(2).unwrap().waiting_time = 17;
        sched.age(&mut table);

        assert_eq!(table.get(1).unwrap().dynamic_priority, 2);
        assert_eq!(table.get(2).unwrap().dynamic_priority, 1);
        assert_eq!(sched.select(&table), Some(2));
    }

    #[test]
    fn test_zero_aging_factor_rejected() {
        assert!(matches!(
            DynamicPriorityScheduler::new(0),
            Err(ConfigError::ZeroAgingFactor)
        ));
    }
}
