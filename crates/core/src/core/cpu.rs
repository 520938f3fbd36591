//! Central CPU state and the tick loop.
//!
//! This module owns the architectural state (register file, program counter,
//! memory image) and the four pipeline latch registers plus the writeback
//! latch copy. Each call to [`Cpu::tick`] advances the pipeline by exactly
//! one cycle, evaluating the stages in reverse order (WB, MEM, EX, ID, IF)
//! so that a single tick never lets one instruction skip a stage.

use crate::common::Trap;
use crate::core::arch::Gpr;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, memory_stage, writeback_stage,
};
use crate::isa::abi;
use crate::memory::Memory;
use crate::stats::SimStats;

/// The pipelined CPU.
///
/// Architectural state plus the in-flight pipeline entries. Within a tick,
/// architectural effects are applied in stage order WB, MEM, EX, ID, IF;
/// across ticks an instruction's effects are never observable to an older
/// instruction.
pub struct Cpu {
    /// General-purpose register file.
    pub regs: Gpr,
    /// Program counter of the next fetch.
    pub pc: u32,
    /// Byte-addressable memory image.
    pub memory: Memory,

    /// IF/ID pipeline latch; `None` is a bubble.
    pub if_id: Option<IfIdEntry>,
    /// ID/EX pipeline latch; `None` is a bubble.
    pub id_ex: Option<IdExEntry>,
    /// EX/MEM pipeline latch; `None` is a bubble.
    pub ex_mem: Option<ExMemEntry>,
    /// MEM/WB pipeline latch; `None` is a bubble.
    pub mem_wb: Option<MemWbEntry>,
    /// Copy of the entry committed this tick, kept for forwarding.
    pub wb_latch: Option<MemWbEntry>,

    /// Execution statistics.
    pub stats: SimStats,
    /// Set when the outermost return has committed.
    pub halted: bool,
    /// PC value whose commitment as a jump target ends the program. The
    /// runner plants this sentinel in `ra` before execution begins.
    pub halt_pc: u32,
}

impl Cpu {
    /// Creates a CPU over the given memory image.
    ///
    /// # Arguments
    ///
    /// * `memory` - The memory image, already populated by the loader.
    /// * `halt_pc` - The return sentinel the runner plants in `ra`.
    pub fn new(memory: Memory, halt_pc: u32) -> Self {
        Self {
            regs: Gpr::new(),
            pc: 0,
            memory,
            if_id: None,
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            wb_latch: None,
            stats: SimStats::default(),
            halted: false,
            halt_pc,
        }
    }

    /// Advances the pipeline by one cycle.
    ///
    /// Stages run in reverse order so each in-flight instruction moves
    /// forward exactly one stage. After the machine halts, further ticks do
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns the trap of an instruction whose fault reached writeback.
    /// Instructions older than the faulting one have already committed.
    pub fn tick(&mut self) -> Result<(), Trap> {
        if self.halted {
            return Ok(());
        }
        self.stats.cycles += 1;

        writeback_stage(self)?;
        if self.halted {
            return Ok(());
        }
        memory_stage(self);
        execute_stage(self);
        decode_stage(self);
        fetch_stage(self);
        Ok(())
    }

    /// Prints the architectural state to stdout in the stable dump format:
    /// one `PC:` line followed by all 32 registers under their ABI names in
    /// index order.
    pub fn dump_state(&self) {
        println!("PC: {:#010x}", self.pc);
        for idx in 0..32 {
            println!("{}: {:#010x}", abi::name(idx), self.regs.read(idx));
        }
    }
}
