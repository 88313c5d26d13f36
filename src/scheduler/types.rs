/*!
 * Scheduler Types
 * Policy selection and per-policy configuration
 */

use super::mlfq::MlfqScheduler;
use super::priority::{DynamicPriorityScheduler, PriorityScheduler};
use super::round_robin::RoundRobinScheduler;
use super::shortest::{SjfScheduler, SrtfScheduler};
use super::traits::Scheduler;
use crate::core::errors::SimResult;
use crate::core::types::Tick;
use serde::{Deserialize, Serialize};

/// Scheduling policy with its configuration values. Parameters are
/// validated when the scheduler is built, never mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Policy {
    /// Fixed priority, FIFO ties, non-preemptive
    Priority,
    /// Priority with aging: effective priority improves with waiting time
    DynamicPriority { aging_factor: Tick },
    /// FIFO rotation on a fixed quantum
    RoundRobin { time_quantum: Tick },
    /// Shortest total burst first, non-preemptive
    Sjf,
    /// Shortest remaining time first, re-evaluated every tick
    Srtf,
    /// Multilevel feedback queue; quantum doubles per level
    Mlfq { time_quantum: Tick, num_queues: usize },
}

impl Policy {
    /// Build a scheduler instance for this policy.
    pub fn build(&self) -> SimResult<Box<dyn Scheduler>> {
        Ok(match *self {
            Policy::Priority => Box::new(PriorityScheduler::new()),
            Policy::DynamicPriority { aging_factor } => {
                Box::new(DynamicPriorityScheduler::new(aging_factor)?)
            }
            Policy::RoundRobin { time_quantum } => {
                Box::new(RoundRobinScheduler::new(time_quantum)?)
            }
            Policy::Sjf => Box::new(SjfScheduler::new()),
            Policy::Srtf => Box::new(SrtfScheduler::new()),
            Policy::Mlfq {
                time_quantum,
                num_queues,
            } => Box::new(MlfqScheduler::new(time_quantum, num_queues)?),
        })
    }

    /// One of each policy with the conventional demo parameters.
    pub fn all_default() -> [Policy; 6] {
        [
            Policy::Priority,
            Policy::DynamicPriority { aging_factor: 3 },
            Policy::RoundRobin { time_quantum: 2 },
            Policy::Sjf,
            Policy::Srtf,
            Policy::Mlfq {
                time_quantum: 2,
                num_queues: 3,
            },
        ]
    }
}
