//! Register read-after-write forwarding tests.
//!
//! Every consecutive-instruction distance at which a producer can sit is
//! exercised; the observed results must match sequential execution exactly.
//! Programs terminate through the untouched return sentinel in `ra`.

use crate::common::builder::{addi, r_type, RET};
use crate::common::harness::TestContext;

/// Encodes `add rd, rs1, rs2`.
fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0b000, rs1, rs2, 0)
}

#[test]
fn test_distance_one_dependency() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 1), // x5 = 1
            addi(6, 5, 2), // x6 = x5 + 2, producer one ahead
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert!(ctx.cpu().halted);
    assert_eq!(ctx.get_reg(5), 1);
    assert_eq!(ctx.get_reg(6), 3);
}

#[test]
fn test_distance_two_dependency() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 7), // x5 = 7
            addi(6, 0, 1), // unrelated
            addi(7, 5, 1), // x7 = x5 + 1, producer two ahead
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert_eq!(ctx.get_reg(7), 8);
}

#[test]
fn test_distance_three_dependency() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 9),
            addi(6, 0, 1),
            addi(7, 0, 2),
            addi(8, 5, 1), // x8 = x5 + 1, producer three ahead
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert_eq!(ctx.get_reg(8), 10);
}

#[test]
fn test_chained_dependencies() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 1), // x5 = 1
            addi(6, 5, 2), // x6 = 3
            add(7, 5, 6),  // x7 = 4
            add(7, 7, 7),  // x7 = 8
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert_eq!(ctx.get_reg(7), 8);
}

#[test]
fn test_x0_is_never_forwarded() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(0, 0, 7), // write to x0 is dropped
            add(5, 0, 0),  // must read architectural zero
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.get_reg(5), 0);
}

#[test]
fn test_latest_producer_wins() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            addi(5, 0, 1), // x5 = 1
            addi(5, 0, 2), // x5 = 2 (younger producer)
            addi(6, 5, 0), // must observe 2, not 1
            RET,
        ],
    );
    ctx.run(50).unwrap();
    assert_eq!(ctx.get_reg(6), 2);
}
