//! Instruction set definitions.
//!
//! This module groups everything that describes the RV32IM instruction set:
//! - `instruction`: raw field extraction and the decoded instruction sum.
//! - `decode`: the instruction decoder.
//! - `abi`: calling-convention register names and indices.
//! - `rv32i`: base integer opcodes and function codes.
//! - `rv32m`: multiply/divide extension function codes.

/// ABI register name constants and lookup.
pub mod abi;

/// Instruction decoding logic.
pub mod decode;

/// Instruction field extraction and the decoded instruction representation.
pub mod instruction;

/// Base integer instruction set constants.
pub mod rv32i;

/// Multiply/divide extension constants.
pub mod rv32m;
