//! Simulation layer: executable loading and the program runner.

/// ELF executable loader.
pub mod loader;

/// Program runner driving the pipeline to termination.
pub mod simulator;

pub use loader::{LoadedImage, LoaderError};
pub use simulator::{Simulator, RETURN_SENTINEL};
