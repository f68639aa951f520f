//! Instruction Fetch (IF) stage.

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::latches::IfId;

/// Executes the instruction fetch stage.
///
/// Reads the instruction at the current program counter into the IF/ID latch
/// and advances the counter. When a stall is pending the latch is held
/// untouched so the same instruction is re-decoded next cycle. Past the end
/// of the program the stage emits bubbles.
///
/// Runs after execute within a tick, so a control-flow redirect taken this
/// cycle already steered the program counter to its target.
pub(crate) fn fetch_stage(pl: &mut Pipeline) {
    if pl.stall_flag {
        return;
    }
    if let Some(&instruction) = pl.instructions.get(pl.pc) {
        pl.if_id = IfId {
            valid: true,
            instruction,
            pc: pl.pc,
        };
        pl.pc += 1;
    } else {
        pl.if_id = IfId::default();
    }
}
