//! Program runner.
//!
//! This module owns the top-level execution flow: it builds the memory image
//! from loader output, initializes the architectural state, drives the
//! pipeline to termination, and exposes the final state dump.
//!
//! Termination works through the sentinel-return mechanism: before execution
//! starts the runner plants [`RETURN_SENTINEL`] in `ra`, so the outermost
//! `ret` redirects to an address no real code lives at. When that jump
//! commits at writeback the machine halts. Returns inside the program are
//! unaffected because their `ra` holds a real address.

use crate::common::Trap;
use crate::config::Config;
use crate::core::Cpu;
use crate::isa::abi;
use crate::memory::Memory;
use crate::sim::loader::{LoadedImage, LoaderError};

/// The distinguished `ra` value marking "return from entry".
///
/// Word-aligned and far outside any plausible memory image so it can never
/// collide with a real return address.
pub const RETURN_SENTINEL: u32 = 0xFFFF_FFF0;

/// Top-level runner: owns the CPU and drives it to termination.
pub struct Simulator {
    /// The simulated machine.
    pub cpu: Cpu,
    max_instructions: Option<u64>,
}

impl Simulator {
    /// Builds a machine from loader output and configuration.
    ///
    /// Deposits every segment into a fresh memory image, sets the PC to the
    /// entry point, `sp` to the top of the configured stack region, and
    /// `ra` to the return sentinel.
    ///
    /// # Errors
    ///
    /// `LoaderError::SegmentOutOfRange` when a segment does not fit inside
    /// the configured memory image.
    pub fn new(image: &LoadedImage, config: &Config) -> Result<Self, LoaderError> {
        let mut memory = Memory::new(config.memory.size);
        for (addr, bytes) in &image.segments {
            memory
                .write_slice(*addr, bytes)
                .map_err(|_| LoaderError::SegmentOutOfRange {
                    addr: *addr,
                    len: bytes.len(),
                })?;
        }

        let stack_top = config.memory.stack_base.wrapping_add(config.memory.stack_size);
        let mut cpu = Cpu::new(memory, RETURN_SENTINEL);
        cpu.pc = image.entry;
        cpu.regs.write(abi::REG_SP, stack_top);
        cpu.regs.write(abi::REG_RA, RETURN_SENTINEL);

        log::info!(
            "simulator: entry={:#010x} sp={:#010x} memory={} bytes",
            image.entry,
            cpu.regs.sp(),
            config.memory.size
        );

        Ok(Self {
            cpu,
            max_instructions: config.general.max_instructions,
        })
    }

    /// Ticks the pipeline until the program terminates.
    ///
    /// # Errors
    ///
    /// Any architectural fault reaching writeback, or `Trap::Timeout` when
    /// the configured instruction ceiling is exceeded.
    pub fn run(&mut self) -> Result<(), Trap> {
        while !self.cpu.halted {
            self.cpu.tick()?;
            if let Some(limit) = self.max_instructions {
                if !self.cpu.halted && self.cpu.stats.instructions_retired > limit {
                    return Err(Trap::Timeout(limit));
                }
            }
        }
        log::info!(
            "simulator: halted after {} instructions, {} cycles",
            self.cpu.stats.instructions_retired,
            self.cpu.stats.cycles
        );
        Ok(())
    }

    /// Prints the final architectural state to stdout.
    pub fn dump_state(&self) {
        self.cpu.dump_state();
    }
}
