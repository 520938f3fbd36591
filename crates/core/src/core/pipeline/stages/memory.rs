//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It
//! issues load and store operations against the memory image at the
//! effective address computed by execute, applying sign or zero extension
//! per the load kind. Out-of-range accesses convert the entry into a fault
//! that rides to writeback. Non-memory instructions pass through unchanged.

use crate::common::Trap;
use crate::core::pipeline::latches::MemWbEntry;
use crate::core::pipeline::signals::MemWidth;
use crate::core::Cpu;
use crate::memory::Memory;

/// Executes the memory stage of the pipeline.
///
/// Consumes the EX/MEM latch, performs the pending memory operation if any,
/// and fills the MEM/WB latch.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn memory_stage(cpu: &mut Cpu) {
    let Some(ex) = cpu.ex_mem.take() else {
        cpu.mem_wb = None;
        return;
    };

    let mut load_data = 0;
    let mut trap = ex.trap;

    if trap.is_none() {
        if ex.ctrl.mem_read {
            log::debug!("MEM pc={:#010x} load addr={:#010x}", ex.pc, ex.alu);
            match load(&cpu.memory, ex.alu, ex.ctrl.width, ex.ctrl.signed_load) {
                Ok(val) => load_data = val,
                Err(fault) => trap = Some(fault),
            }
        } else if ex.ctrl.mem_write {
            log::debug!(
                "MEM pc={:#010x} store addr={:#010x} data={:#010x}",
                ex.pc,
                ex.alu,
                ex.store_data
            );
            let result = match ex.ctrl.width {
                MemWidth::Byte => cpu.memory.store_byte(ex.alu, ex.store_data as u8),
                MemWidth::Half => cpu.memory.store_half(ex.alu, ex.store_data as u16),
                MemWidth::Word => cpu.memory.store_word(ex.alu, ex.store_data),
                MemWidth::Nop => Ok(()),
            };
            if let Err(fault) = result {
                trap = Some(fault);
            }
        }
    }

    cpu.mem_wb = Some(MemWbEntry {
        pc: ex.pc,
        inst: ex.inst,
        rd: ex.rd,
        alu: ex.alu,
        load_data,
        redirect: ex.redirect,
        ctrl: ex.ctrl,
        trap,
    });
}

/// Performs a load of the given width, applying sign or zero extension to
/// 32 bits.
fn load(memory: &Memory, addr: u32, width: MemWidth, signed: bool) -> Result<u32, Trap> {
    let val = match (width, signed) {
        (MemWidth::Byte, true) => memory.load_byte(addr)? as i8 as i32 as u32,
        (MemWidth::Byte, false) => memory.load_byte(addr)? as u32,
        (MemWidth::Half, true) => memory.load_half(addr)? as i16 as i32 as u32,
        (MemWidth::Half, false) => memory.load_half(addr)? as u32,
        (MemWidth::Word, _) => memory.load_word(addr)?,
        (MemWidth::Nop, _) => 0,
    };
    Ok(val)
}
