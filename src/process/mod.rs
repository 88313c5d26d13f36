/*!
 * Process Module
 * Process control block, state machine, and process table
 */

pub mod interval;
pub mod pcb;
pub mod table;
pub mod types;

pub use interval::Interval;
pub use pcb::Pcb;
pub use table::ProcessTable;
pub use types::ProcessState;
