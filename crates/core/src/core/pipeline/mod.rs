//! Five-stage pipeline.
//!
//! This module organizes the pipeline machinery:
//! 1. **Latches:** The entry types carried between stages (IF/ID, ID/EX,
//!    EX/MEM, MEM/WB).
//! 2. **Signals:** Control signals generated at decode and consumed
//!    downstream.
//! 3. **Hazards:** Operand forwarding for read-after-write dependencies.
//! 4. **Stages:** The per-stage functions run in reverse order each tick.

/// Operand forwarding logic.
pub mod hazards;

/// Pipeline latch entry structures.
pub mod latches;

/// Pipeline control signals and operation types.
pub mod signals;

/// The five pipeline stage functions.
pub mod stages;
