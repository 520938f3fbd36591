//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It
//! commits results to the register file, updates retirement statistics, and
//! detects the two ways a run ends:
//! 1. **Fault:** A trap carried by the committing entry aborts the pipeline.
//!    Older instructions have already committed; younger ones are discarded.
//! 2. **Termination:** A committing jump whose resolved target equals the
//!    runner's return sentinel halts the machine.
//!
//! The committed entry is preserved in the writeback latch copy so the
//! execute stage can forward its value in the same tick.

use crate::common::Trap;
use crate::core::Cpu;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
///
/// # Errors
///
/// Returns the trap carried by the committing instruction, aborting the
/// pipeline.
pub fn writeback_stage(cpu: &mut Cpu) -> Result<(), Trap> {
    let Some(wb) = cpu.mem_wb.take() else {
        cpu.wb_latch = None;
        return Ok(());
    };

    if let Some(trap) = wb.trap {
        log::error!("WB  pc={:#010x} fault: {}", wb.pc, trap);
        return Err(trap);
    }

    cpu.stats.instructions_retired += 1;
    if wb.ctrl.mem_read {
        cpu.stats.inst_load += 1;
    } else if wb.ctrl.mem_write {
        cpu.stats.inst_store += 1;
    } else if wb.ctrl.branch || wb.ctrl.jump {
        cpu.stats.inst_branch += 1;
    } else {
        cpu.stats.inst_alu += 1;
    }

    if wb.ctrl.reg_write {
        let val = wb.writeback_value();
        log::debug!("WB  pc={:#010x} x{} <= {:#010x}", wb.pc, wb.rd, val);
        cpu.regs.write(wb.rd, val);
    }

    // The outermost return: a jump that lands on the sentinel the runner
    // planted in ra before execution began.
    if wb.ctrl.jump && wb.redirect == Some(cpu.halt_pc) {
        log::info!("WB  pc={:#010x} return to sentinel, halting", wb.pc);
        cpu.halted = true;
    }

    cpu.wb_latch = Some(wb);
    Ok(())
}
