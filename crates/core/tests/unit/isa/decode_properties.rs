//! Instruction Decode Properties.
//!
//! Verifies that `decode()` correctly extracts opcode, register fields,
//! function codes, and sign-extended immediates for every instruction
//! format in RV32IM, and that re-encoding the decoded fields reproduces the
//! original instruction word for all six shapes.

use crate::common::builder::{b_type, i_type, j_type, r_type, s_type, u_type};
use rv32_core::isa::decode::decode;
use rv32_core::isa::instruction::Decoded;
use rv32_core::Trap;

#[test]
fn test_decode_r_type_fields() {
    let inst = r_type(0x33, 3, 0b000, 1, 2, 0x20);
    match decode(inst).unwrap() {
        Decoded::R {
            rd,
            rs1,
            rs2,
            funct3,
            funct7,
        } => {
            assert_eq!(rd, 3);
            assert_eq!(rs1, 1);
            assert_eq!(rs2, 2);
            assert_eq!(funct3, 0);
            assert_eq!(funct7, 0x20);
        }
        other => panic!("expected R shape, got {:?}", other),
    }
}

#[test]
fn test_decode_i_type_positive_and_negative_imm() {
    for imm in [0, 1, 5, 2047, -1, -5, -2048] {
        let inst = i_type(0x13, 7, 0b000, 9, imm);
        match decode(inst).unwrap() {
            Decoded::I {
                opcode,
                rd,
                rs1,
                funct3,
                imm: decoded,
            } => {
                assert_eq!(opcode, 0x13);
                assert_eq!(rd, 7);
                assert_eq!(rs1, 9);
                assert_eq!(funct3, 0);
                assert_eq!(decoded, imm, "imm {imm} mis-decoded");
            }
            other => panic!("expected I shape, got {:?}", other),
        }
    }
}

#[test]
fn test_decode_load_and_jalr_are_i_shaped() {
    for opcode in [0x03, 0x67] {
        match decode(i_type(opcode, 1, 0b010, 2, -4)).unwrap() {
            Decoded::I {
                opcode: decoded, ..
            } => assert_eq!(decoded, opcode),
            other => panic!("expected I shape, got {:?}", other),
        }
    }
}

#[test]
fn test_decode_s_type_split_imm() {
    for imm in [0, 1, 31, 32, 2047, -1, -32, -2048] {
        let inst = s_type(0x23, 0b010, 5, 2, imm);
        match decode(inst).unwrap() {
            Decoded::S {
                rs1,
                rs2,
                funct3,
                imm: decoded,
            } => {
                assert_eq!(rs1, 5);
                assert_eq!(rs2, 2);
                assert_eq!(funct3, 0b010);
                assert_eq!(decoded, imm, "imm {imm} mis-decoded");
            }
            other => panic!("expected S shape, got {:?}", other),
        }
    }
}

#[test]
fn test_decode_b_type_even_imm() {
    for imm in [0, 2, 8, 4094, -2, -8, -4096] {
        let inst = b_type(0x63, 0b000, 1, 2, imm);
        match decode(inst).unwrap() {
            Decoded::B { imm: decoded, .. } => {
                assert_eq!(decoded, imm, "imm {imm} mis-decoded");
                assert_eq!(decoded & 1, 0);
            }
            other => panic!("expected B shape, got {:?}", other),
        }
    }
}

#[test]
fn test_decode_u_type_keeps_low_bits_zero() {
    for imm in [0u32, 0x1000, 0xFFFF_F000, 0x8000_0000] {
        let inst = u_type(0x37, 4, imm as i32);
        match decode(inst).unwrap() {
            Decoded::U {
                opcode,
                rd,
                imm: decoded,
            } => {
                assert_eq!(opcode, 0x37);
                assert_eq!(rd, 4);
                assert_eq!(decoded as u32, imm);
                assert_eq!(decoded & 0xFFF, 0);
            }
            other => panic!("expected U shape, got {:?}", other),
        }
    }
}

#[test]
fn test_decode_auipc_is_u_shaped() {
    match decode(u_type(0x17, 1, 0x12345000)).unwrap() {
        Decoded::U { opcode, .. } => assert_eq!(opcode, 0x17),
        other => panic!("expected U shape, got {:?}", other),
    }
}

#[test]
fn test_decode_j_type_even_imm() {
    for imm in [0, 2, 12, 2048, 0xF_FFFE, -2, -2048, -0x10_0000] {
        let inst = j_type(0x6F, 1, imm);
        match decode(inst).unwrap() {
            Decoded::J { rd, imm: decoded } => {
                assert_eq!(rd, 1);
                assert_eq!(decoded, imm, "imm {imm} mis-decoded");
            }
            other => panic!("expected J shape, got {:?}", other),
        }
    }
}

#[test]
fn test_zero_word_is_illegal() {
    assert_eq!(decode(0), Err(Trap::IllegalInstruction(0)));
}

#[test]
fn test_unknown_opcodes_are_illegal() {
    for opcode in [0b0000001, 0b0101010, 0b1110011, 0b0001111] {
        let inst = i_type(opcode, 1, 0, 1, 0);
        assert_eq!(decode(inst), Err(Trap::IllegalInstruction(inst)));
    }
}

/// Re-encodes a decoded instruction using the shape encoders.
fn encode(d: &Decoded, opcode_hint: u32) -> u32 {
    match *d {
        Decoded::R {
            rd,
            rs1,
            rs2,
            funct3,
            funct7,
        } => r_type(0x33, rd as u32, funct3, rs1 as u32, rs2 as u32, funct7),
        Decoded::I {
            opcode,
            rd,
            rs1,
            funct3,
            imm,
        } => i_type(opcode, rd as u32, funct3, rs1 as u32, imm),
        Decoded::S {
            rs1,
            rs2,
            funct3,
            imm,
        } => s_type(0x23, funct3, rs1 as u32, rs2 as u32, imm),
        Decoded::B {
            rs1,
            rs2,
            funct3,
            imm,
        } => b_type(0x63, funct3, rs1 as u32, rs2 as u32, imm),
        Decoded::U { opcode, rd, imm } => u_type(opcode, rd as u32, imm),
        Decoded::J { rd, imm } => j_type(opcode_hint, rd as u32, imm),
    }
}

#[test]
fn test_decode_encode_round_trip_all_shapes() {
    let words = [
        r_type(0x33, 3, 0b000, 1, 2, 0x00),
        r_type(0x33, 31, 0b101, 30, 29, 0x20),
        r_type(0x33, 4, 0b100, 1, 2, 0x01),
        i_type(0x13, 1, 0b000, 0, 5),
        i_type(0x13, 2, 0b111, 3, -1),
        i_type(0x03, 6, 0b010, 5, -2048),
        i_type(0x67, 0, 0b000, 1, 0),
        s_type(0x23, 0b010, 5, 2, 0),
        s_type(0x23, 0b000, 1, 31, -1),
        b_type(0x63, 0b000, 1, 2, 8),
        b_type(0x63, 0b111, 3, 4, -4096),
        u_type(0x37, 1, 0xDEAD_B000_u32 as i32),
        u_type(0x17, 2, 0x0000_1000),
        j_type(0x6F, 1, 2048),
        j_type(0x6F, 0, -4),
    ];

    for word in words {
        let decoded = decode(word).unwrap();
        assert_eq!(
            encode(&decoded, 0x6F),
            word,
            "round trip failed for {:#010x} ({:?})",
            word,
            decoded
        );
    }
}
