/*!
 * Simulation Engine
 * Drives the discrete-time tick loop over a process table and a scheduler
 */

use crate::core::errors::SimResult;
use crate::core::types::{Pid, Tick};
use crate::process::pcb::Pcb;
use crate::process::table::ProcessTable;
use crate::process::types::ProcessState;
use crate::scheduler::traits::Scheduler;
use crate::sim::history::ExecutionHistory;
use crate::sim::report::{RunReport, SimStats};
use log::{debug, error, info, warn};
use std::panic::{self, AssertUnwindSafe};

/// Default run bound, in ticks.
pub const DEFAULT_MAX_TICKS: Tick = 100;

/// Single-CPU discrete-time simulation.
///
/// Owns the clock, the process table, and the scheduler; the tick loop is
/// the only mutator of process state during a run. Each tick: reconcile
/// I/O, age waiters, admit arrivals, select, execute one time unit, record.
pub struct Simulation {
    table: ProcessTable,
    scheduler: Box<dyn Scheduler>,
    history: ExecutionHistory,
    max_ticks: Tick,
    clock: Tick,
    /// Process holding the CPU at the end of the previous tick
    running: Option<Pid>,
    stats: SimStats,
}

impl Simulation {
    pub fn new(scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            table: ProcessTable::new(),
            scheduler,
            history: ExecutionHistory::new(),
            max_ticks: DEFAULT_MAX_TICKS,
            clock: 0,
            running: None,
            stats: SimStats::default(),
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Tick) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Register a process record before the run. Rejects duplicate PIDs.
    pub fn add_process(&mut self, pcb: Pcb) -> SimResult<()> {
        self.table.insert(pcb)
    }

    pub fn add_processes(&mut self, pcbs: impl IntoIterator<Item = Pcb>) -> SimResult<()> {
        for pcb in pcbs {
            self.add_process(pcb)?;
        }
        Ok(())
    }

    /// Run the simulation from a clean state until every process terminates
    /// or `max_ticks` is exhausted. Re-running resets and reproduces
    /// the identical history.
    pub fn run(&mut self) -> &ExecutionHistory {
        self.reset();
        info!(
            "run started: policy={}, processes={}, max_ticks={}",
            self.scheduler.name(),
            self.table.len(),
            self.max_ticks
        );

        while self.clock < self.max_ticks && !self.table.all_terminated() {
            self.step();
        }

        info!(
            "run finished: policy={}, ticks={}, completed={}/{}",
            self.scheduler.name(),
            self.history.len(),
            self.scheduler.terminated().len(),
            self.table.len()
        );
        &self.history
    }

    fn reset(&mut self) {
        self.table.reset_all();
        self.scheduler.reset();
        self.history.clear();
        self.clock = 0;
        self.running = None;
        self.stats = SimStats::default();
    }

    /// One tick. A panicking scheduler is contained here: the tick is
    /// logged and recorded as idle instead of crashing the run.
    fn step(&mut self) {
        let tick = self.clock;
        let scheduler = &mut self.scheduler;
        let table = &mut self.table;

        let selected = panic::catch_unwind(AssertUnwindSafe(|| {
            scheduler.reconcile_io(table);
            scheduler.age(table);
            for pid in table.arrivals_at(tick) {
                debug!("tick {tick}: process {pid} arrived");
                scheduler.add(pid);
            }
            scheduler.select(table)
        }));

        match selected {
            Ok(Some(pid)) if self.table.get(pid).is_some() => self.execute(pid, tick),
            Ok(Some(pid)) => {
                warn!("tick {tick}: scheduler selected unknown process {pid}");
                self.record_idle(tick);
            }
            Ok(None) => self.record_idle(tick),
            Err(_) => {
                error!(
                    "tick {tick}: scheduler {} panicked; treating tick as idle",
                    self.scheduler.name()
                );
                self.record_idle(tick);
            }
        }

        self.clock += 1;
    }

    fn record_idle(&mut self, tick: Tick) {
        self.history.record(tick, None, None);
        self.running = None;
    }

    /// Execute one CPU unit for `pid` and apply the post-execution
    /// transition: block on a hit I/O threshold, terminate on a drained
    /// burst, otherwise keep the CPU.
    fn execute(&mut self, pid: Pid, tick: Tick) {
        if let Some(prev) = self.running {
            if prev != pid {
                self.stats.preemptions += 1;
                if let Some(p) = self.table.get_mut(prev) {
                    if p.state == ProcessState::Running {
                        p.state = ProcessState::Ready;
                    }
                }
            }
        }

        let (post_state, io_due) = match self.table.get_mut(pid) {
            Some(p) => {
                p.execute_unit(tick);
                (p.state, p.io_due())
            }
            None => return,
        };
        self.history.record(tick, Some(pid), Some(post_state));

        if io_due {
            if let Some(p) = self.table.get_mut(pid) {
                p.start_io();
                debug!(
                    "tick {tick}: process {pid} blocked for {} ticks of I/O",
                    p.io_remaining
                );
            }
            self.scheduler.block(pid);
            self.running = None;
        } else if post_state == ProcessState::Terminated {
            self.scheduler.terminate(pid, tick + 1, &mut self.table);
            info!("tick {tick}: process {pid} terminated at {}", tick + 1);
            self.running = None;
        } else {
            self.running = Some(pid);
        }
    }

    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    /// Final process records, for renderers and statistics.
    pub fn processes(&self) -> &[Pcb] {
        self.table.as_slice()
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    /// Summarize the last run.
    pub fn report(&self) -> RunReport {
        RunReport::from_run(self.scheduler.name(), &self.table, &self.history, self.stats)
    }
}
