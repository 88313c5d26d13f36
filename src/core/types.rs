/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Priority level (>= 1, lower is more urgent)
pub type Priority = u32;

/// Discrete simulation time unit
pub type Tick = u64;
