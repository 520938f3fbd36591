//! Byte-addressable memory image.
//!
//! This module implements the flat memory region backing program text,
//! initialized data, bss, heap, and stack. It provides:
//! 1. **Accessors:** Byte, half-word, and word loads and stores.
//! 2. **Bounds Checking:** Every touched byte must lie inside the image.
//! 3. **Endianness:** All multi-byte accesses are little-endian regardless
//!    of host byte order.
//!
//! Alignment is not enforced: misaligned accesses are legal and produce the
//! little-endian byte interpretation.

use crate::common::Trap;

/// Flat byte-addressable memory image.
///
/// A word at address `A` occupies bytes `A, A+1, A+2, A+3` in ascending
/// significance.
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory image of the given size in bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Returns the size of the image in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Validates that `len` bytes starting at `addr` lie inside the image.
    ///
    /// # Returns
    ///
    /// The byte offset of `addr` on success, `None` when any touched byte
    /// falls outside `[0, size)`.
    fn range(&self, addr: u32, len: usize) -> Option<usize> {
        let offset = addr as usize;
        let end = offset.checked_add(len)?;
        if end <= self.data.len() {
            Some(offset)
        } else {
            None
        }
    }

    /// Loads a byte.
    ///
    /// # Errors
    ///
    /// `Trap::LoadAccessFault` when `addr` is outside the image.
    pub fn load_byte(&self, addr: u32) -> Result<u8, Trap> {
        let offset = self.range(addr, 1).ok_or(Trap::LoadAccessFault(addr))?;
        Ok(self.data[offset])
    }

    /// Loads a little-endian half-word.
    ///
    /// # Errors
    ///
    /// `Trap::LoadAccessFault` when any touched byte is outside the image.
    pub fn load_half(&self, addr: u32) -> Result<u16, Trap> {
        let offset = self.range(addr, 2).ok_or(Trap::LoadAccessFault(addr))?;
        let bytes = [self.data[offset], self.data[offset + 1]];
        Ok(u16::from_le_bytes(bytes))
    }

    /// Loads a little-endian word.
    ///
    /// # Errors
    ///
    /// `Trap::LoadAccessFault` when any touched byte is outside the image.
    pub fn load_word(&self, addr: u32) -> Result<u32, Trap> {
        let offset = self.range(addr, 4).ok_or(Trap::LoadAccessFault(addr))?;
        let bytes = [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ];
        Ok(u32::from_le_bytes(bytes))
    }

    /// Stores a byte.
    ///
    /// # Errors
    ///
    /// `Trap::StoreAccessFault` when `addr` is outside the image.
    pub fn store_byte(&mut self, addr: u32, val: u8) -> Result<(), Trap> {
        let offset = self.range(addr, 1).ok_or(Trap::StoreAccessFault(addr))?;
        self.data[offset] = val;
        Ok(())
    }

    /// Stores a half-word little-endian.
    ///
    /// # Errors
    ///
    /// `Trap::StoreAccessFault` when any touched byte is outside the image.
    pub fn store_half(&mut self, addr: u32, val: u16) -> Result<(), Trap> {
        let offset = self.range(addr, 2).ok_or(Trap::StoreAccessFault(addr))?;
        self.data[offset..offset + 2].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Stores a word little-endian.
    ///
    /// # Errors
    ///
    /// `Trap::StoreAccessFault` when any touched byte is outside the image.
    pub fn store_word(&mut self, addr: u32, val: u32) -> Result<(), Trap> {
        let offset = self.range(addr, 4).ok_or(Trap::StoreAccessFault(addr))?;
        self.data[offset..offset + 4].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Copies a byte slice into the image, used for segment deposit.
    ///
    /// # Errors
    ///
    /// `Trap::StoreAccessFault` when the slice does not fit.
    pub fn write_slice(&mut self, addr: u32, bytes: &[u8]) -> Result<(), Trap> {
        let offset = self
            .range(addr, bytes.len())
            .ok_or(Trap::StoreAccessFault(addr))?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}
