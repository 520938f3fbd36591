//! RISC-V Multiply/Divide Extension (RV32M).
//!
//! The M extension shares the `OP_REG` opcode with base integer
//! instructions; it is selected by the `funct7` field.

/// Function code 3 definitions for multiply/divide operations.
pub mod funct3;

/// M-extension opcode selector.
pub mod opcodes;
