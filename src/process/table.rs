/*!
 * Process Table
 * Owns every process record for a simulation run
 */

use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{Pid, Tick};
use crate::process::pcb::Pcb;
use serde::{Deserialize, Serialize};

/// Insertion-ordered store of process records.
///
/// Insertion order doubles as the admission tie-break when several processes
/// arrive on the same tick, so lookups stay deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTable {
    entries: Vec<Pcb>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, rejecting duplicate PIDs.
    pub fn insert(&mut self, pcb: Pcb) -> SimResult<()> {
        if self.entries.iter().any(|p| p.pid == pcb.pid) {
            return Err(ConfigError::DuplicatePid(pcb.pid));
        }
        self.entries.push(pcb);
        Ok(())
    }

    pub fn get(&self, pid: Pid) -> Option<&Pcb> {
        self.entries.iter().find(|p| p.pid == pid)
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Pcb> {
        self.entries.iter_mut().find(|p| p.pid == pid)
    }

    /// PIDs arriving exactly at `tick`, in insertion order.
    pub fn arrivals_at(&self, tick: Tick) -> Vec<Pid> {
        self.entries
            .iter()
            .filter(|p| p.arrival_time == tick)
            .map(|p| p.pid)
            .collect()
    }

    /// True for an empty table as well; an empty run completes immediately.
    pub fn all_terminated(&self) -> bool {
        self.entries.iter().all(Pcb::is_terminated)
    }

    pub fn reset_all(&mut self) {
        for p in &mut self.entries {
            p.reset();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pcb> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Pcb] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
