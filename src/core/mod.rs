/*!
 * Core Module
 * Shared types and error taxonomy
 */

pub mod errors;
pub mod types;

pub use errors::{ConfigError, SimResult};
pub use types::{Pid, Priority, Tick};
