//! Execution units.
//!
//! Pure functional units used by the execute stage. The only unit this
//! machine needs is the integer ALU; branch-condition evaluation and jump
//! target resolution live in the execute stage itself.

/// Integer arithmetic logic unit.
pub mod alu;

pub use alu::Alu;
