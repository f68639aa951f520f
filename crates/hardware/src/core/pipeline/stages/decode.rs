//! Instruction Decode (ID) stage.

use tracing::trace;

use crate::common::Word;
use crate::core::pipeline::latches::{IdEx, IfId};
use crate::core::pipeline::{Pipeline, hazards};

/// Executes the instruction decode stage.
///
/// Consults the hazard unit, reads source registers, and fills the ID/EX
/// latch. Three squash paths emit a bubble instead:
///
/// * **Flush:** a redirect taken in execute this cycle invalidates the
///   wrong-path fetch sitting in IF/ID and bubbles ID/EX so the redirecting
///   instruction is not decoded or executed again.
/// * **Empty input:** an invalid IF/ID propagates as a bubble.
/// * **Stall:** a load-use hazard bubbles ID/EX while IF/ID is left in place
///   for a second decode attempt next cycle.
pub(crate) fn decode_stage(pl: &mut Pipeline) {
    if pl.flush_flag {
        pl.if_id = IfId::default();
        pl.id_ex = IdEx::default();
        return;
    }
    if !pl.if_id.valid {
        pl.id_ex = IdEx::default();
        return;
    }

    pl.stall_flag = hazards::need_stall_load_use(&pl.if_id, &pl.id_ex);
    if pl.stall_flag {
        pl.stats.stalls_inserted += 1;
        trace!(
            consumer = %pl.if_id.instruction,
            producer = %pl.id_ex.instruction,
            "load-use hazard, inserting bubble"
        );
        pl.id_ex = IdEx::default();
        return;
    }

    let instruction = pl.if_id.instruction;
    let (rs1, rs2) = instruction.sources();
    pl.id_ex = IdEx {
        valid: true,
        instruction,
        rs1_value: rs1.map_or(0, |r| pl.regs.read(r)),
        rs2_value: rs2.map_or(0, |r| pl.regs.read(r)),
        immediate: instruction.immediate().map_or(0, Word::from),
    };
}
