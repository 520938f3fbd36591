//! Pipeline stages.
//!
//! One module per stage, each exposing a single function over the CPU state.
//! The tick loop runs them in reverse order (writeback first) so that an
//! instruction advances exactly one stage per tick.

/// Instruction fetch (IF) stage.
pub mod fetch;

/// Instruction decode (ID) stage.
pub mod decode;

/// Execute (EX) stage.
pub mod execute;

/// Memory access (MEM) stage.
pub mod memory;

/// Writeback (WB) stage.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::memory_stage;
pub use writeback::writeback_stage;
