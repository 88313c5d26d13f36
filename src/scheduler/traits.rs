/*!
 * Scheduler Traits
 * The capability set every scheduling policy implements
 */

use crate::core::types::{Pid, Tick};
use crate::process::table::ProcessTable;

/// Scheduling policy interface.
///
/// The simulation engine is the only caller; it drives these in a fixed
/// per-tick order (reconcile I/O, age, admit arrivals, select). `select` may
/// mutate scheduler bookkeeping (quantum counters, queue positions) but
/// never process state; state flips belong to the engine.
pub trait Scheduler: Send {
    /// Short policy name, for logs and reports.
    fn name(&self) -> &'static str;

    /// Enqueue a newly-eligible Ready process. No-op if already tracked.
    fn add(&mut self, pid: Pid);

    /// Move a process out of the CPU/ready structures into the blocked set.
    fn block(&mut self, pid: Pid);

    /// Count down blocked processes' I/O and return finished ones to a
    /// ready structure. Each process spends one full tick blocked per unit
    /// of I/O duration; the countdown starts on the tick after blocking.
    fn reconcile_io(&mut self, table: &mut ProcessTable);

    /// Accrue waiting time for Ready processes; DynamicPriority also
    /// recomputes dynamic priorities here.
    fn age(&mut self, table: &mut ProcessTable);

    /// Remove a process from all structures and stamp its completion tick.
    fn terminate(&mut self, pid: Pid, tick: Tick, table: &mut ProcessTable);

    /// Pick the process to run this tick, or None when nothing is ready.
    fn select(&mut self, table: &ProcessTable) -> Option<Pid>;

    /// PIDs terminated so far, in completion order.
    fn terminated(&self) -> &[Pid];

    /// Clear all structures for a fresh run.
    fn reset(&mut self);
}
