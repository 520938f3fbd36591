//! Control hazard tests.
//!
//! Taken branches and jumps must flush the younger instructions behind
//! them; not-taken branches must not disturb the instruction stream.

use crate::common::builder::{addi, b_type, jal, RET};
use crate::common::harness::TestContext;

/// Encodes `beq rs1, rs2, offset`.
fn beq(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(0x63, 0b000, rs1, rs2, offset)
}

/// Encodes `bne rs1, rs2, offset`.
fn bne(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(0x63, 0b001, rs1, rs2, offset)
}

#[test]
fn test_taken_branch_flushes_fall_through() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 1), // x5 = 1
            addi(6, 0, 1), // x6 = 1
            beq(5, 6, 8),  // equal: skip the next instruction
            addi(7, 0, 3), // must never commit
            addi(8, 0, 4), // branch target
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert!(ctx.cpu().halted);
    assert_eq!(ctx.get_reg(7), 0, "flushed instruction committed");
    assert_eq!(ctx.get_reg(8), 4);
    assert!(ctx.cpu().stats.control_flushes >= 1);
}

#[test]
fn test_not_taken_branch_does_not_redirect() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 1), // x5 = 1
            addi(6, 0, 2), // x6 = 2
            beq(5, 6, 8),  // not equal: fall through
            addi(7, 0, 3), // must commit
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert_eq!(ctx.get_reg(7), 3);
}

#[test]
fn test_backward_branch_loops() {
    // Counts x5 down from 3; the loop body runs exactly three times.
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 3),   // x5 = 3
            addi(6, 0, 0),   // x6 = 0
            addi(6, 6, 1),   // loop: x6 += 1
            addi(5, 5, -1),  // x5 -= 1
            bne(5, 0, -8),   // repeat while x5 != 0
            RET,
        ],
    );
    ctx.run(200).unwrap();
    assert!(ctx.cpu().halted);
    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.get_reg(6), 3);
}

#[test]
fn test_jump_skips_instructions() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            jal(0, 12),    // jump over the next two instructions
            addi(5, 0, 1), // must never commit
            addi(6, 0, 2), // must never commit
            addi(7, 0, 3),
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.get_reg(6), 0);
    assert_eq!(ctx.get_reg(7), 3);
}

#[test]
fn test_branch_operands_are_forwarded() {
    // The comparison operands are produced by the two instructions
    // directly ahead of the branch.
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 4), // x5 = 4
            addi(6, 0, 4), // x6 = 4
            beq(5, 6, 8),  // must observe both as 4 and take the branch
            addi(7, 0, 1), // must never commit
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert_eq!(ctx.get_reg(7), 0);
}
