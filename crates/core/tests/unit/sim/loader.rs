//! ELF loader tests.
//!
//! The images are hand-built minimal ELF32 executables: a 52-byte header,
//! one program header, and the code bytes.

use std::io::Write as _;

use rv32_core::sim::loader::{load_elf, load_file, LoaderError};

/// ELF machine number for RISC-V.
const EM_RISCV: u16 = 243;

/// Builds a minimal 32-bit ELF executable with one PT_LOAD segment.
///
/// `big_endian` selects the encoding of both the container fields and the
/// code words.
fn build_elf(entry: u32, vaddr: u32, code: &[u32], machine: u16, big_endian: bool) -> Vec<u8> {
    let u16b = |v: u16| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };
    let u32b = |v: u32| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };

    let mut bytes = Vec::new();
    // e_ident
    bytes.extend_from_slice(&[0x7F, b'E', b'L', b'F']);
    bytes.push(1); // EI_CLASS: 32-bit
    bytes.push(if big_endian { 2 } else { 1 }); // EI_DATA
    bytes.push(1); // EI_VERSION
    bytes.extend_from_slice(&[0; 9]);
    // ELF header
    bytes.extend_from_slice(&u16b(2)); // e_type: EXEC
    bytes.extend_from_slice(&u16b(machine));
    bytes.extend_from_slice(&u32b(1)); // e_version
    bytes.extend_from_slice(&u32b(entry));
    bytes.extend_from_slice(&u32b(52)); // e_phoff
    bytes.extend_from_slice(&u32b(0)); // e_shoff
    bytes.extend_from_slice(&u32b(0)); // e_flags
    bytes.extend_from_slice(&u16b(52)); // e_ehsize
    bytes.extend_from_slice(&u16b(32)); // e_phentsize
    bytes.extend_from_slice(&u16b(1)); // e_phnum
    bytes.extend_from_slice(&u16b(40)); // e_shentsize
    bytes.extend_from_slice(&u16b(0)); // e_shnum
    bytes.extend_from_slice(&u16b(0)); // e_shstrndx
    // Program header (PT_LOAD)
    let filesz = (code.len() * 4) as u32;
    bytes.extend_from_slice(&u32b(1)); // p_type
    bytes.extend_from_slice(&u32b(84)); // p_offset
    bytes.extend_from_slice(&u32b(vaddr));
    bytes.extend_from_slice(&u32b(vaddr)); // p_paddr
    bytes.extend_from_slice(&u32b(filesz));
    bytes.extend_from_slice(&u32b(filesz)); // p_memsz
    bytes.extend_from_slice(&u32b(5)); // p_flags: R+X
    bytes.extend_from_slice(&u32b(4)); // p_align
    // Segment data
    for word in code {
        bytes.extend_from_slice(&u32b(*word));
    }
    bytes
}

#[test]
fn test_load_minimal_executable() {
    let code = [0x0050_0093, 0x0000_8067];
    let bytes = build_elf(0x100, 0x100, &code, EM_RISCV, false);

    let image = load_elf(&bytes).unwrap();
    assert_eq!(image.entry, 0x100);
    assert_eq!(image.segments.len(), 1);
    let (vaddr, data) = &image.segments[0];
    assert_eq!(*vaddr, 0x100);

    let mut expected = Vec::new();
    expected.extend_from_slice(&0x0050_0093_u32.to_le_bytes());
    expected.extend_from_slice(&0x0000_8067_u32.to_le_bytes());
    assert_eq!(data, &expected);
}

#[test]
fn test_big_endian_input_is_byte_swapped() {
    let code = [0x0050_0093];
    let bytes = build_elf(0x0, 0x0, &code, EM_RISCV, true);

    let image = load_elf(&bytes).unwrap();
    let (_, data) = &image.segments[0];
    // The image must hold the word little-endian regardless of input
    // encoding.
    assert_eq!(data.as_slice(), &0x0050_0093_u32.to_le_bytes());
}

#[test]
fn test_wrong_machine_is_rejected() {
    let bytes = build_elf(0, 0, &[0x13], 62, false); // x86-64
    assert!(matches!(load_elf(&bytes), Err(LoaderError::NotRiscv32)));
}

#[test]
fn test_garbage_is_rejected() {
    assert!(matches!(
        load_elf(&[0, 1, 2, 3]),
        Err(LoaderError::Elf(_))
    ));
}

#[test]
fn test_truncated_segment_is_rejected() {
    let mut bytes = build_elf(0, 0, &[0x13, 0x13, 0x13], EM_RISCV, false);
    bytes.truncate(bytes.len() - 8);
    assert!(matches!(load_elf(&bytes), Err(LoaderError::Malformed(_))));
}

#[test]
fn test_load_file_roundtrip() {
    let code = [0x0050_0093, 0x0000_8067];
    let bytes = build_elf(0x40, 0x40, &code, EM_RISCV, false);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    let image = load_file(file.path()).unwrap();
    assert_eq!(image.entry, 0x40);
    assert_eq!(image.segments.len(), 1);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_file(std::path::Path::new("/nonexistent/program.elf"));
    assert!(matches!(result, Err(LoaderError::Io(_))));
}
