//! Data Hazard Resolution.
//!
//! This module implements the logic for maintaining pipeline consistency
//! when data dependencies exist between instructions. It provides operand
//! forwarding (bypassing) that resolves Read-After-Write hazards without
//! stall cycles.
//!
//! Stages evaluate in reverse order within a tick (WB, MEM, EX, ID, IF), so
//! by the time execute runs:
//! - the distance-1 producer has just left the memory stage and sits in the
//!   fresh MEM/WB latch with any loaded data already resolved;
//! - the distance-2 producer was committed earlier in the same tick and its
//!   entry is preserved in the writeback latch copy, while the consumer's
//!   register read predates that commit;
//! - distance-3 and older producers committed before the consumer's decode
//!   read the register file.
//!
//! Forwarding from those two latches therefore yields exactly the values a
//! stall-based pipeline would read.

use crate::core::pipeline::latches::{IdExEntry, MemWbEntry};

/// Forwards register values from in-flight instructions to resolve data
/// hazards.
///
/// Overlays the operand values captured at decode with newer results,
/// oldest source first so the youngest producer wins. Entries that carry a
/// trap never forward, and `x0` is never forwarded.
///
/// # Arguments
///
/// * `id_entry` - The ID/EX entry whose source operands need resolution.
/// * `mem_wb` - The fresh MEM/WB latch (distance-1 producer).
/// * `wb_latch` - The entry committed this tick (distance-2 producer).
///
/// # Returns
///
/// A tuple `(rs1_val, rs2_val)` containing the architecturally current
/// source register values.
pub fn forward_operands(
    id_entry: &IdExEntry,
    mem_wb: &Option<MemWbEntry>,
    wb_latch: &Option<MemWbEntry>,
) -> (u32, u32) {
    let mut a = id_entry.rv1;
    let mut b = id_entry.rv2;

    for producer in [wb_latch, mem_wb].into_iter().flatten() {
        if producer.trap.is_some() {
            continue;
        }
        if !producer.ctrl.reg_write || producer.rd == 0 {
            continue;
        }

        let val = producer.writeback_value();
        if producer.rd == id_entry.rs1 {
            log::debug!(
                "forward pc={:#010x} rs1=x{} val={:#010x}",
                id_entry.pc,
                id_entry.rs1,
                val
            );
            a = val;
        }
        if producer.rd == id_entry.rs2 {
            log::debug!(
                "forward pc={:#010x} rs2=x{} val={:#010x}",
                id_entry.pc,
                id_entry.rs2,
                val
            );
            b = val;
        }
    }

    (a, b)
}
