/*!
 * Queue Plumbing
 * Ready/blocked/terminated bookkeeping shared by the single-queue policies
 */

use crate::core::types::{Pid, Tick};
use crate::process::pcb::Pcb;
use crate::process::table::ProcessTable;
use crate::process::types::ProcessState;
use std::collections::VecDeque;

/// Queue state for policies with one ready queue and a current-process slot.
///
/// A process lives in exactly one of `ready`, `blocked` (or `just_blocked`),
/// `terminated`, or the `current` slot.
#[derive(Debug, Default)]
pub(crate) struct QueueCore {
    pub ready: VecDeque<Pid>,
    pub blocked: Vec<Pid>,
    /// Blocked since the last reconcile pass; countdown starts next tick
    pub just_blocked: Vec<Pid>,
    pub terminated: Vec<Pid>,
    pub current: Option<Pid>,
}

impl QueueCore {
    pub fn contains(&self, pid: Pid) -> bool {
        self.current == Some(pid)
            || self.ready.contains(&pid)
            || self.blocked.contains(&pid)
            || self.just_blocked.contains(&pid)
            || self.terminated.contains(&pid)
    }

    pub fn admit(&mut self, pid: Pid) {
        if !self.contains(pid) {
            self.ready.push_back(pid);
        }
    }

    pub fn block(&mut self, pid: Pid) {
        if self.current == Some(pid) {
            self.current = None;
        }
        self.ready.retain(|&p| p != pid);
        if !self.blocked.contains(&pid) && !self.just_blocked.contains(&pid) {
            self.just_blocked.push(pid);
        }
    }

    /// Tick every blocked process's I/O countdown and hand back the ones
    /// that finished. Freshly blocked processes join the countdown only
    /// after this pass.
    pub fn drain_completed_io(&mut self, table: &mut ProcessTable) -> Vec<Pid> {
        let completed = drain_completed_io(&mut self.blocked, table);
        self.blocked.append(&mut self.just_blocked);
        completed
    }

    /// One tick of waiting for everything in the ready queue.
    pub fn bump_waiting(&self, table: &mut ProcessTable) {
        for &pid in &self.ready {
            if let Some(p) = table.get_mut(pid) {
                p.waiting_time += 1;
            }
        }
    }

    pub fn terminate(&mut self, pid: Pid, tick: Tick, table: &mut ProcessTable) {
        if self.current == Some(pid) {
            self.current = None;
        }
        self.ready.retain(|&p| p != pid);
        self.blocked.retain(|&p| p != pid);
        self.just_blocked.retain(|&p| p != pid);
        if let Some(p) = table.get_mut(pid) {
            p.state = ProcessState::Terminated;
            p.completion_time = Some(tick);
        }
        if !self.terminated.contains(&pid) {
            self.terminated.push(pid);
        }
    }

    pub fn reset(&mut self) {
        self.ready.clear();
        self.blocked.clear();
        self.just_blocked.clear();
        self.terminated.clear();
        self.current = None;
    }
}

/// Decrement the countdown of every process in `blocked`, removing and
/// returning those whose I/O completed.
pub(crate) fn drain_completed_io(blocked: &mut Vec<Pid>, table: &mut ProcessTable) -> Vec<Pid> {
    let mut completed = Vec::new();
    blocked.retain(|&pid| match table.get_mut(pid) {
        Some(p) => {
            if p.tick_io() {
                completed.push(pid);
                false
            } else {
                true
            }
        }
        None => false,
    });
    completed
}

/// Index of the first ready process minimizing `key`; ties keep FIFO order.
pub(crate) fn min_position_by_key<K: Ord>(
    ready: &VecDeque<Pid>,
    table: &ProcessTable,
    mut key: impl FnMut(&Pcb) -> K,
) -> Option<usize> {
    let mut best: Option<(usize, K)> = None;
    for (idx, &pid) in ready.iter().enumerate() {
        if let Some(p) = table.get(pid) {
            let k = key(p);
            match &best {
                Some((_, best_key)) if *best_key <= k => {}
                _ => best = Some((idx, k)),
            }
        }
    }
    best.map(|(idx, _)| idx)
}

/// Pop the first ready process minimizing `key`.
pub(crate) fn take_min_by_key<K: Ord>(
    ready: &mut VecDeque<Pid>,
    table: &ProcessTable,
    key: impl FnMut(&Pcb) -> K,
) -> Option<Pid> {
    let idx = min_position_by_key(ready, table, key)?;
    ready.remove(idx)
}
