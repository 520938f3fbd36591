//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It
//! reads the word at the current program counter from the memory image,
//! fills the IF/ID latch, and advances the PC by one instruction. A redirect
//! resolved by the execute stage earlier in the same tick has already
//! updated the PC, so the fetch lands on the redirect target.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::Trap;
use crate::core::pipeline::latches::IfIdEntry;
use crate::core::Cpu;

/// Executes the instruction fetch stage.
///
/// Fetches the instruction at the current PC into the IF/ID latch and sets
/// the next PC. A fetch outside the memory image produces an entry carrying
/// an instruction access fault, which rides the pipeline to writeback.
///
/// Fetch is suppressed once the PC reaches the runner's return sentinel:
/// the program has issued its final return and the pipeline is draining.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.pc == cpu.halt_pc {
        cpu.if_id = None;
        return;
    }

    let pc = cpu.pc;
    cpu.if_id = match cpu.memory.load_word(pc) {
        Ok(inst) => {
            log::debug!("IF  pc={:#010x} inst={:#010x}", pc, inst);
            Some(IfIdEntry {
                pc,
                inst,
                trap: None,
            })
        }
        Err(_) => Some(IfIdEntry {
            pc,
            inst: 0,
            trap: Some(Trap::InstructionAccessFault(pc)),
        }),
    };

    cpu.pc = pc.wrapping_add(INSTRUCTION_SIZE);
}
