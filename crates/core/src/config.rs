//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline constants (memory size, stack region).
//! 2. **Structures:** Hierarchical config for general and memory settings.
//!
//! Configuration is supplied as JSON (via the CLI `--config` flag) or use
//! `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Total size of the memory image in bytes (1 MiB).
    ///
    /// The image backs program text, initialized data, bss, heap, and stack.
    /// Any access beyond this size is an access fault.
    pub const MEMORY_SIZE: usize = 1024 * 1024;

    /// Base address of the stack region.
    ///
    /// Used when the executable does not describe a stack region, which is
    /// the normal case for statically linked RV32 binaries.
    pub const STACK_BASE: u32 = 0x10000;

    /// Size of the stack region in bytes.
    pub const STACK_SIZE: u32 = 0x1000;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rv32_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.memory.size, 1024 * 1024);
/// assert_eq!(config.memory.stack_base, 0x10000);
/// assert_eq!(config.general.max_instructions, None);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory image and stack region settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Instruction-count ceiling for bounded execution.
    ///
    /// `None` runs until architectural termination. When set, exceeding the
    /// ceiling aborts the run with a timeout fault.
    #[serde(default)]
    pub max_instructions: Option<u64>,
}

/// Memory image and stack region configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Memory image size in bytes.
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,

    /// Stack region base address.
    #[serde(default = "MemoryConfig::default_stack_base")]
    pub stack_base: u32,

    /// Stack region size in bytes. The stack pointer is initialized to
    /// `stack_base + stack_size`.
    #[serde(default = "MemoryConfig::default_stack_size")]
    pub stack_size: u32,
}

impl MemoryConfig {
    /// Returns the default memory image size in bytes.
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    /// Returns the default stack region base address.
    fn default_stack_base() -> u32 {
        defaults::STACK_BASE
    }

    /// Returns the default stack region size in bytes.
    fn default_stack_size() -> u32 {
        defaults::STACK_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            stack_base: defaults::STACK_BASE,
            stack_size: defaults::STACK_SIZE,
        }
    }
}
