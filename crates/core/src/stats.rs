//! Simulation statistics collection and reporting.
//!
//! This module tracks execution counters for the simulator. It provides:
//! 1. **Cycle and IPC:** Total ticks, retired instructions, and derived IPC.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, control flow).
//! 3. **Pipeline events:** Control-redirect flush count.
//!
//! These are event counts only; the simulator does not model timing.

use std::time::Instant;

/// Execution statistics gathered over a simulation run.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total pipeline ticks elapsed.
    pub cycles: u64,
    /// Number of instructions committed at writeback.
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of ALU (non-load/store/control) instructions retired.
    pub inst_alu: u64,

    /// Number of pipeline flushes caused by taken branches and jumps.
    pub control_flushes: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_alu: 0,
            control_flushes: 0,
        }
    }
}

impl SimStats {
    /// Prints a statistics summary to stdout.
    ///
    /// Division by zero is prevented by clamping the cycle count to at
    /// least 1 before computing IPC.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let ipc = self.instructions_retired as f64 / cyc as f64;

        println!("==========================================================");
        println!("SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        println!("  inst.alu               {}", self.inst_alu);
        println!("  inst.load              {}", self.inst_load);
        println!("  inst.store             {}", self.inst_store);
        println!("  inst.branch            {}", self.inst_branch);
        println!("----------------------------------------------------------");
        println!("  control_flushes        {}", self.control_flushes);
        println!("==========================================================");
    }
}
