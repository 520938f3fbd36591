//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Defines standard RISC-V ABI register names and their corresponding
//! register indices. The names are used only for diagnostics and the final
//! state dump; the register file itself is indexed numerically.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address, ra).
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;

/// ABI register names for x0-x31 in index order.
pub const NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn name(idx: usize) -> &'static str {
    NAMES.get(idx).copied().unwrap_or("x??")
}
