//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the
//! following:
//! 1. **Decoding:** Converts raw instruction bits into the shaped `Decoded`
//!    sum using the ISA decoder.
//! 2. **Control Generation:** Derives ALU, memory, and writeback control
//!    signals for the downstream stages.
//! 3. **Register Read:** Captures the source operands (rs1, rs2) from the
//!    register file; the execute stage overlays them with forwarded values.
//!
//! Decode failures are not raised here: the trap rides the ID/EX entry to
//! writeback so that older in-flight instructions commit first.

use crate::common::Trap;
use crate::core::pipeline::latches::IdExEntry;
use crate::core::pipeline::signals::{AluOp, ControlSignals, MemWidth, OpASrc, OpBSrc};
use crate::core::Cpu;
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m::{funct3 as m_funct3, opcodes as m_opcodes};

/// Bit position of the arithmetic-shift flag inside the I-type immediate.
///
/// SRLI and SRAI share `funct3`; bit 30 of the instruction (bit 10 of the
/// immediate) selects the arithmetic variant.
const SHIFT_ARITH_BIT: u32 = 10;

/// Executes the instruction decode stage.
///
/// Consumes the IF/ID latch, decodes the instruction, generates control
/// signals, reads source operands, and fills the ID/EX latch. An empty
/// IF/ID latch (bubble or flush) propagates as an empty ID/EX latch.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn decode_stage(cpu: &mut Cpu) {
    let Some(entry) = cpu.if_id.take() else {
        cpu.id_ex = None;
        return;
    };

    if entry.trap.is_some() {
        cpu.id_ex = Some(IdExEntry {
            pc: entry.pc,
            inst: entry.inst,
            trap: entry.trap,
            ..Default::default()
        });
        return;
    }

    let decoded = decode(entry.inst).and_then(|d| {
        let ctrl = control_signals(&d, entry.inst)?;
        Ok((d, ctrl))
    });

    cpu.id_ex = match decoded {
        Ok((d, ctrl)) => {
            let rs1 = d.rs1().unwrap_or(0);
            let rs2 = d.rs2().unwrap_or(0);
            log::debug!("ID  pc={:#010x} {:?}", entry.pc, d);
            Some(IdExEntry {
                pc: entry.pc,
                inst: entry.inst,
                rs1,
                rs2,
                rd: d.rd().unwrap_or(0),
                imm: immediate(&d),
                rv1: cpu.regs.read(rs1),
                rv2: cpu.regs.read(rs2),
                ctrl,
                trap: None,
            })
        }
        Err(trap) => Some(IdExEntry {
            pc: entry.pc,
            inst: entry.inst,
            trap: Some(trap),
            ..Default::default()
        }),
    };
}

/// Returns the sign-extended immediate of a decoded instruction, or zero
/// for the R shape, which has none.
fn immediate(d: &Decoded) -> i32 {
    match *d {
        Decoded::R { .. } => 0,
        Decoded::I { imm, .. }
        | Decoded::S { imm, .. }
        | Decoded::B { imm, .. }
        | Decoded::U { imm, .. }
        | Decoded::J { imm, .. } => imm,
    }
}

/// Generates the control signals for a decoded instruction.
///
/// # Errors
///
/// `Trap::IllegalInstruction` for unrecognized load/store widths and
/// unrecognized R-type `(funct3, funct7)` combinations.
fn control_signals(d: &Decoded, inst: u32) -> Result<ControlSignals, Trap> {
    let mut c = ControlSignals::default();

    match *d {
        Decoded::U { opcode, .. } => {
            c.reg_write = true;
            c.a_src = if opcode == opcodes::OP_LUI {
                OpASrc::Zero
            } else {
                OpASrc::Pc
            };
        }
        Decoded::J { .. } => {
            c.reg_write = true;
            c.jump = true;
        }
        Decoded::B { .. } => {
            c.branch = true;
            c.b_src = OpBSrc::Reg2;
        }
        Decoded::S { funct3: f3, .. } => {
            c.mem_write = true;
            c.width = match f3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return Err(Trap::IllegalInstruction(inst)),
            };
        }
        Decoded::I {
            opcode: opcodes::OP_JALR,
            ..
        } => {
            c.reg_write = true;
            c.jump = true;
        }
        Decoded::I {
            opcode: opcodes::OP_LOAD,
            funct3: f3,
            ..
        } => {
            c.reg_write = true;
            c.mem_read = true;
            let (width, signed) = match f3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return Err(Trap::IllegalInstruction(inst)),
            };
            c.width = width;
            c.signed_load = signed;
        }
        Decoded::I {
            opcode: opcodes::OP_IMM,
            funct3: f3,
            imm,
            ..
        } => {
            c.reg_write = true;
            c.alu = match f3 {
                funct3::ADD_SUB => AluOp::Add,
                funct3::SLT => AluOp::Slt,
                funct3::SLTU => AluOp::Sltu,
                funct3::XOR => AluOp::Xor,
                funct3::OR => AluOp::Or,
                funct3::AND => AluOp::And,
                funct3::SLL => AluOp::Sll,
                funct3::SRL_SRA => {
                    if (imm >> SHIFT_ARITH_BIT) & 1 != 0 {
                        AluOp::Sra
                    } else {
                        AluOp::Srl
                    }
                }
                _ => return Err(Trap::IllegalInstruction(inst)),
            };
        }
        Decoded::I { .. } => return Err(Trap::IllegalInstruction(inst)),
        Decoded::R {
            funct3: f3,
            funct7: f7,
            ..
        } => {
            c.reg_write = true;
            c.b_src = OpBSrc::Reg2;

            if f7 == m_opcodes::M_EXTENSION {
                c.alu = match f3 {
                    m_funct3::MUL => AluOp::Mul,
                    m_funct3::MULH => AluOp::Mulh,
                    m_funct3::MULHSU => AluOp::Mulhsu,
                    m_funct3::MULHU => AluOp::Mulhu,
                    m_funct3::DIV => AluOp::Div,
                    m_funct3::DIVU => AluOp::Divu,
                    m_funct3::REM => AluOp::Rem,
                    m_funct3::REMU => AluOp::Remu,
                    _ => return Err(Trap::IllegalInstruction(inst)),
                };
            } else {
                c.alu = match (f3, f7) {
                    (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
                    (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
                    (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                    (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
                    (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
                    (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
                    (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                    (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                    (funct3::OR, funct7::DEFAULT) => AluOp::Or,
                    (funct3::AND, funct7::DEFAULT) => AluOp::And,
                    _ => return Err(Trap::IllegalInstruction(inst)),
                };
            }
        }
    }

    Ok(c)
}
