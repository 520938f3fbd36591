//! RV32IM pipelined instruction-set simulator library.
//!
//! This crate implements a user-level RISC-V RV32IM simulator with the following:
//! 1. **Core:** Five-stage pipeline (fetch, decode, execute, memory, writeback) and GPR state.
//! 2. **Memory:** A flat, bounds-checked, little-endian byte-addressable memory image.
//! 3. **ISA:** Decoding and execution for the RV32I base set and the M extension.
//! 4. **Simulation:** ELF loader, runner, configuration, and statistics collection.

/// Common types and constants (traps, instruction geometry).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, register file, execution units).
pub mod core;
/// Instruction set (decode, instruction fields, ABI, RV32I, RV32M).
pub mod isa;
/// Byte-addressable memory image.
pub mod memory;
/// ELF loader and program runner.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds the register file, memory image, and pipeline latches.
pub use crate::core::Cpu;
/// Architectural fault type carried through the pipeline.
pub use crate::common::Trap;
/// Top-level runner; construct with `Simulator::new` and drive with `run`.
pub use crate::sim::Simulator;
