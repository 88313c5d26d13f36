/*!
 * Scheduler Module
 * Pluggable scheduling policies behind a single trait
 */

mod queue;

pub mod mlfq;
pub mod priority;
pub mod round_robin;
pub mod shortest;
pub mod traits;
pub mod types;

pub use mlfq::MlfqScheduler;
pub use priority::{DynamicPriorityScheduler, PriorityScheduler};
pub use round_robin::RoundRobinScheduler;
pub use shortest::{SjfScheduler, SrtfScheduler};
pub use traits::Scheduler;
pub use types::Policy;
