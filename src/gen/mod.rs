/*!
 * Workload Generation
 * Seedable random process generator for reproducible runs
 */

use crate::core::errors::SimResult;
use crate::core::types::{Pid, Priority, Tick};
use crate::process::pcb::Pcb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Renderer color tags, assigned cyclically by PID.
pub const PALETTE: [&str; 12] = [
    "#FF5733", "#33FF57", "#5733FF", "#FF33A8", "#33A8FF", "#A8FF33", "#FF8C33", "#8C33FF",
    "#33FFEC", "#EC33FF", "#FFEC33", "#33ECFF",
];

/// Bounds for random workloads. Bursts are drawn from `5..=max_burst`,
/// I/O thresholds from inside the burst, arrivals from `0..=max_arrival`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkloadConfig {
    pub num_processes: usize,
    pub max_burst: Tick,
    pub max_priority: Priority,
    pub max_io_ops: usize,
    pub max_io_duration: Tick,
    pub max_arrival: Tick,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            num_processes: 6,
            max_burst: 20,
            max_priority: 10,
            max_io_ops: 3,
            max_io_duration: 5,
            max_arrival: 10,
        }
    }
}

/// Deterministic workload source: the same seed and config always yield
/// the same processes.
#[derive(Debug)]
pub struct WorkloadGenerator {
    rng: StdRng,
    config: WorkloadConfig,
}

impl WorkloadGenerator {
    pub fn new(seed: u64, config: WorkloadConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn generate(&mut self) -> SimResult<Vec<Pcb>> {
        (1..=self.config.num_processes)
            .map(|i| {
                let burst = self.rng.gen_range(5..=self.config.max_burst.max(5));
                let priority = self.rng.gen_range(1..=self.config.max_priority.max(1));

                let mut io_map = BTreeMap::new();
                for _ in 0..self.rng.gen_range(0..=self.config.max_io_ops) {
                    let threshold = self.rng.gen_range(1..burst);
                    let duration = self.rng.gen_range(1..=self.config.max_io_duration.max(1));
                    io_map.insert(threshold, duration);
                }

                let arrival = self.rng.gen_range(0..=self.config.max_arrival);
                Pcb::new(i as Pid, priority, burst, io_map, arrival)
                    .map(|p| p.with_color(PALETTE[(i - 1) % PALETTE.len()]))
            })
            .collect()
    }
}
