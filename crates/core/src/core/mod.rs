//! CPU core.
//!
//! This module contains the architectural state and the pipelined execution
//! engine: register file, pipeline latches and stages, hazard resolution,
//! and the execution units.

/// Architectural register state.
pub mod arch;

/// Central CPU state and the tick loop.
pub mod cpu;

/// Five-stage pipeline (latches, signals, hazards, stages).
pub mod pipeline;

/// Execution units (integer ALU).
pub mod units;

pub use cpu::Cpu;
