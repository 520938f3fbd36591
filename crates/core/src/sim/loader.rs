//! ELF executable loader.
//!
//! This module parses statically linked 32-bit RISC-V ELF executables and
//! produces the inputs the runner needs: loadable segments, and the entry
//! point. It performs:
//! 1. **Validation:** The file must be a 32-bit RISC-V executable.
//! 2. **Segment Collection:** Every `PT_LOAD` segment yields its file bytes
//!    at its virtual address; BSS tails are implicitly zero in the fresh
//!    memory image.
//! 3. **Endianness Normalization:** Big-endian encodings are byte-swapped so
//!    the memory image is always little-endian.

use std::fmt;
use std::fs;
use std::path::Path;

use goblin::elf::header::EM_RISCV;
use goblin::elf::program_header::PT_LOAD;
use goblin::elf::Elf;

/// Errors raised while reading or parsing an executable.
#[derive(Debug)]
pub enum LoaderError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The bytes are not a parseable ELF container.
    Elf(goblin::error::Error),
    /// The ELF is not a 32-bit RISC-V executable.
    NotRiscv32,
    /// The ELF is structurally valid but carries impossible values.
    Malformed(String),
    /// A loadable segment does not fit inside the memory image.
    SegmentOutOfRange {
        /// Virtual address of the offending segment.
        addr: u32,
        /// Length of the offending segment in bytes.
        len: usize,
    },
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Io(e) => write!(f, "failed to read executable: {}", e),
            LoaderError::Elf(e) => write!(f, "failed to parse ELF: {}", e),
            LoaderError::NotRiscv32 => write!(f, "not a 32-bit RISC-V executable"),
            LoaderError::Malformed(reason) => write!(f, "malformed executable: {}", reason),
            LoaderError::SegmentOutOfRange { addr, len } => write!(
                f,
                "segment at {:#010x} ({} bytes) does not fit in the memory image",
                addr, len
            ),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(e: std::io::Error) -> Self {
        LoaderError::Io(e)
    }
}

impl From<goblin::error::Error> for LoaderError {
    fn from(e: goblin::error::Error) -> Self {
        LoaderError::Elf(e)
    }
}

/// Loader output: everything the runner needs to initialize the machine.
///
/// The stack region is not described by statically linked RV32 executables;
/// the runner takes it from configuration.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// `(virtual_address, bytes)` pairs to deposit into the memory image.
    pub segments: Vec<(u32, Vec<u8>)>,
    /// Entry-point program counter.
    pub entry: u32,
}

/// Reads and parses an executable from disk.
///
/// # Errors
///
/// `LoaderError::Io` when the file cannot be read, otherwise whatever
/// [`load_elf`] raises.
pub fn load_file(path: &Path) -> Result<LoadedImage, LoaderError> {
    let bytes = fs::read(path)?;
    load_elf(&bytes)
}

/// Parses a 32-bit RISC-V ELF executable.
///
/// # Arguments
///
/// * `bytes` - The raw file contents.
///
/// # Errors
///
/// `LoaderError::Elf` for unparseable containers, `LoaderError::NotRiscv32`
/// for wrong machine or class, `LoaderError::Malformed` for values that do
/// not fit the 32-bit address space.
pub fn load_elf(bytes: &[u8]) -> Result<LoadedImage, LoaderError> {
    let elf = Elf::parse(bytes)?;

    if elf.is_64 || elf.header.e_machine != EM_RISCV {
        return Err(LoaderError::NotRiscv32);
    }

    let entry = u32::try_from(elf.entry)
        .map_err(|_| LoaderError::Malformed(format!("entry point {:#x} beyond 32 bits", elf.entry)))?;

    let mut segments = Vec::new();
    for phdr in &elf.program_headers {
        if phdr.p_type != PT_LOAD {
            continue;
        }

        let vaddr = u32::try_from(phdr.p_vaddr).map_err(|_| {
            LoaderError::Malformed(format!("segment address {:#x} beyond 32 bits", phdr.p_vaddr))
        })?;
        let offset = phdr.p_offset as usize;
        let filesz = phdr.p_filesz as usize;
        if filesz == 0 {
            continue;
        }
        let end = offset
            .checked_add(filesz)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| {
                LoaderError::Malformed(format!(
                    "segment data at offset {} ({} bytes) exceeds file size {}",
                    offset,
                    filesz,
                    bytes.len()
                ))
            })?;

        let mut data = bytes[offset..end].to_vec();
        if !elf.little_endian {
            swap_words(&mut data);
        }
        log::info!(
            "loader: segment {:#010x} ({} bytes)",
            vaddr,
            data.len()
        );
        segments.push((vaddr, data));
    }

    log::info!("loader: entry {:#010x}", entry);
    Ok(LoadedImage { segments, entry })
}

/// Reverses each 32-bit word in place, converting big-endian encodings to
/// the little-endian layout of the memory image.
fn swap_words(data: &mut [u8]) {
    for chunk in data.chunks_mut(4) {
        chunk.reverse();
    }
}
