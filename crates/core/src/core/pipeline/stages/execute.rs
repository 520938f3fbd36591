//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the
//! following:
//! 1. **Operand Resolution:** Uses the forwarding logic to resolve data
//!    hazards.
//! 2. **Arithmetic Execution:** Performs ALU operations; for loads and
//!    stores the result is the effective address, for jumps the link value.
//! 3. **Branch Resolution:** Evaluates branch conditions and jump targets
//!    and redirects the PC on any taken branch or jump.
//!
//! A redirect flushes the younger IF/ID latch; the ID/EX latch was consumed
//! by this stage in the same tick, so both latches behind the redirecting
//! instruction end the tick invalid.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::ExMemEntry;
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::Alu;
use crate::core::Cpu;
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::{funct3, opcodes};

/// Bit mask clearing the low bit of a JALR target address.
const JALR_ALIGNMENT_MASK: u32 = !1;

/// Executes the instruction execute stage.
///
/// Consumes the ID/EX latch, performs the arithmetic operation, resolves
/// control flow, and fills the EX/MEM latch. Taken branches and jumps set
/// the PC to the resolved target and flush the fetch latch; the resolved
/// target is recorded in the entry for the termination check at writeback.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn execute_stage(cpu: &mut Cpu) {
    let Some(id) = cpu.id_ex.take() else {
        cpu.ex_mem = None;
        return;
    };

    if id.trap.is_some() {
        cpu.ex_mem = Some(ExMemEntry {
            pc: id.pc,
            inst: id.inst,
            rd: id.rd,
            ctrl: id.ctrl,
            trap: id.trap,
            ..Default::default()
        });
        return;
    }

    let (fwd_a, fwd_b) = hazards::forward_operands(&id, &cpu.mem_wb, &cpu.wb_latch);

    let op_a = match id.ctrl.a_src {
        OpASrc::Reg1 => fwd_a,
        OpASrc::Pc => id.pc,
        OpASrc::Zero => 0,
    };
    let op_b = match id.ctrl.b_src {
        OpBSrc::Reg2 => fwd_b,
        OpBSrc::Imm => id.imm as u32,
    };

    let mut alu_out = Alu::execute(id.ctrl.alu, op_a, op_b);
    let mut redirect = None;

    if id.ctrl.branch {
        let taken = match id.inst.funct3() {
            funct3::BEQ => fwd_a == fwd_b,
            funct3::BNE => fwd_a != fwd_b,
            funct3::BLT => (fwd_a as i32) < (fwd_b as i32),
            funct3::BGE => (fwd_a as i32) >= (fwd_b as i32),
            funct3::BLTU => fwd_a < fwd_b,
            funct3::BGEU => fwd_a >= fwd_b,
            _ => false,
        };
        if taken {
            redirect = Some(id.pc.wrapping_add(id.imm as u32));
        }
    }

    if id.ctrl.jump {
        let is_jalr = id.inst.opcode() == opcodes::OP_JALR;
        let target = if is_jalr {
            fwd_a.wrapping_add(id.imm as u32) & JALR_ALIGNMENT_MASK
        } else {
            id.pc.wrapping_add(id.imm as u32)
        };
        // The link value is what reaches rd at writeback.
        alu_out = id.pc.wrapping_add(INSTRUCTION_SIZE);
        redirect = Some(target);
    }

    if let Some(target) = redirect {
        log::debug!("EX  pc={:#010x} redirect -> {:#010x}", id.pc, target);
        cpu.pc = target;
        cpu.if_id = None;
        cpu.stats.control_flushes += 1;
    } else {
        log::debug!("EX  pc={:#010x} alu={:#010x}", id.pc, alu_out);
    }

    cpu.ex_mem = Some(ExMemEntry {
        pc: id.pc,
        inst: id.inst,
        rd: id.rd,
        alu: alu_out,
        store_data: fwd_b,
        redirect,
        ctrl: id.ctrl,
        trap: None,
    });
}
