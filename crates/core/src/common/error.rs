//! Trap definitions.
//!
//! This module defines the error handling mechanism for the simulator. It provides:
//! 1. **Trap Representation:** Encompassing every fault the machine can raise.
//! 2. **Error Handling:** Integrating with standard Rust error traits for system-level reporting.
//!
//! A trap detected in an early pipeline stage is carried inside the pipeline
//! latch entry and only acted upon when the faulting instruction reaches
//! writeback, so that older instructions commit first.

use std::fmt;

/// Architectural fault types raised during simulation.
///
/// Division by zero is deliberately absent: the RV32M divide instructions
/// have architecturally defined results for a zero divisor and never trap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Illegal instruction fault.
    ///
    /// Raised when an instruction encoding is invalid: an unrecognized
    /// opcode, an unrecognized function-code combination, or the all-zero
    /// word. The associated value is the instruction encoding.
    IllegalInstruction(u32),

    /// Instruction access fault.
    ///
    /// Raised when an instruction fetch falls outside the memory image.
    /// The associated value is the faulting address.
    InstructionAccessFault(u32),

    /// Load access fault.
    ///
    /// Raised when a load touches any byte outside the memory image.
    /// The associated value is the faulting effective address.
    LoadAccessFault(u32),

    /// Store access fault.
    ///
    /// Raised when a store touches any byte outside the memory image.
    /// The associated value is the faulting effective address.
    StoreAccessFault(u32),

    /// Bounded-execution ceiling exceeded.
    ///
    /// Raised by the runner when the configured instruction limit is
    /// reached. The associated value is the limit that was exceeded.
    Timeout(u64),
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trap::IllegalInstruction(inst) => write!(f, "IllegalInstruction({:#010x})", inst),
            Trap::InstructionAccessFault(addr) => {
                write!(f, "InstructionAccessFault({:#010x})", addr)
            }
            Trap::LoadAccessFault(addr) => write!(f, "LoadAccessFault({:#010x})", addr),
            Trap::StoreAccessFault(addr) => write!(f, "StoreAccessFault({:#010x})", addr),
            Trap::Timeout(limit) => write!(f, "Timeout({} instructions)", limit),
        }
    }
}

impl std::error::Error for Trap {}
