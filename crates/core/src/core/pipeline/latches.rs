//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five pipeline
//! stages: Fetch -> Decode -> Execute -> Memory -> Writeback.
//!
//! 1. **Instruction Flow:** Structures for carrying state between stages.
//! 2. **Trap Propagation:** A trap detected early rides its entry to
//!    writeback so older instructions commit first.
//!
//! The latch registers themselves are `Option<Entry>` fields on the CPU:
//! `None` is the invalid/bubble state, a flush stores `None`, and downstream
//! stages act only on `Some` entries.

use crate::common::Trap;
use crate::core::pipeline::signals::ControlSignals;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
///
/// Contains the raw instruction fetched from memory and its address.
#[derive(Clone, Debug, Default)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Trap that occurred during fetch, if any.
    pub trap: Option<Trap>,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
///
/// Contains decoded instruction information, including register indices,
/// captured operand values, the immediate, and control signals.
#[derive(Clone, Debug, Default)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// First source register index (rs1).
    pub rs1: usize,
    /// Second source register index (rs2).
    pub rs2: usize,
    /// Destination register index (rd).
    pub rd: usize,
    /// Sign-extended immediate value.
    pub imm: i32,
    /// Value read from the rs1 register at decode time.
    pub rv1: u32,
    /// Value read from the rs2 register at decode time.
    pub rv2: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// Trap that occurred during fetch or decode, if any.
    pub trap: Option<Trap>,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
///
/// Contains execution results: the ALU output doubles as the effective
/// address for memory operations and as the link value for jumps.
#[derive(Clone, Debug, Default)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// ALU result, effective address, or link value.
    pub alu: u32,
    /// Data to be stored (for store instructions).
    pub store_data: u32,
    /// Resolved redirect target for taken branches and jumps.
    pub redirect: Option<u32>,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// Trap carried from an earlier stage, if any.
    pub trap: Option<Trap>,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
///
/// Contains memory stage results, including loaded data and the final
/// register write value.
#[derive(Clone, Debug, Default)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// ALU computation result (for non-load instructions).
    pub alu: u32,
    /// Data loaded from memory (for load instructions).
    pub load_data: u32,
    /// Resolved redirect target for taken branches and jumps.
    pub redirect: Option<u32>,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// Trap carried from an earlier stage, if any.
    pub trap: Option<Trap>,
}

impl MemWbEntry {
    /// Returns the value this entry writes to its destination register.
    ///
    /// Loads commit the loaded data; everything else commits the ALU value
    /// (which execute set to the link address for jumps).
    pub fn writeback_value(&self) -> u32 {
        if self.ctrl.mem_read {
            self.load_data
        } else {
            self.alu
        }
    }
}
