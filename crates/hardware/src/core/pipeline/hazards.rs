//! Data hazard detection and forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when
//! data dependencies exist between instructions. It provides:
//! 1. **Hazard detection:** Identifies load-use hazards that require a
//!    one-cycle stall.
//! 2. **Operand forwarding:** Resolves the remaining Read-After-Write hazards
//!    by bypassing the register file.
//!
//! Both queries are pure functions of the latches they receive; there is no
//! hidden state, which keeps them independently testable.

use tracing::trace;

use crate::common::Word;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::isa::Op;

/// Source selected for one operand of the instruction entering execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward {
    /// Use the value latched at decode.
    None,
    /// Bypass from the EX/MEM latch (result one cycle old).
    ExMem,
    /// Bypass from the MEM/WB latch (result two cycles old).
    MemWb,
}

/// Checks whether the pipeline must stall for a load-use data hazard.
///
/// A load-use hazard occurs when the instruction being decoded reads a
/// register that a load one stage ahead is still fetching from memory. The
/// load's result only exists after its memory stage, so forwarding alone
/// cannot satisfy the consumer; one bubble must separate them.
///
/// All other Read-After-Write hazards are covered by forwarding and never
/// stall.
pub fn need_stall_load_use(if_id: &IfId, id_ex: &IdEx) -> bool {
    if !if_id.valid {
        return false;
    }
    if !id_ex.valid || id_ex.instruction.op() != Op::Load {
        return false;
    }
    let Some(rd) = id_ex.instruction.dest() else {
        return false;
    };
    if rd == 0 {
        // R0 is hardwired to zero; a load targeting it has no visible effect.
        return false;
    }
    let (rs1, rs2) = if_id.instruction.sources();
    rs1 == Some(rd) || rs2 == Some(rd)
}

/// Determines the forwarding source for each operand.
///
/// EX/MEM is considered first; MEM/WB only fills a signal that is still
/// [`Forward::None`], because EX/MEM holds the fresher write on a collision.
/// Only operations that write the register file (with a non-zero destination)
/// can be forwarding sources.
pub fn forward_select(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> (Forward, Forward) {
    let mut rs1_src = Forward::None;
    let mut rs2_src = Forward::None;
    if !id_ex.valid {
        return (rs1_src, rs2_src);
    }
    let (rs1, rs2) = id_ex.instruction.sources();

    if ex_mem.valid {
        if let Some(rd) = ex_mem.instruction.dest() {
            if rd != 0 {
                if rs1 == Some(rd) {
                    rs1_src = Forward::ExMem;
                }
                if rs2 == Some(rd) {
                    rs2_src = Forward::ExMem;
                }
            }
        }
    }

    if mem_wb.valid {
        if let Some(rd) = mem_wb.instruction.dest() {
            if rd != 0 {
                if rs1 == Some(rd) && rs1_src == Forward::None {
                    rs1_src = Forward::MemWb;
                }
                if rs2 == Some(rd) && rs2_src == Forward::None {
                    rs2_src = Forward::MemWb;
                }
            }
        }
    }

    (rs1_src, rs2_src)
}

/// Produces the effective operand values for the instruction entering execute.
///
/// Starts from the values latched at decode and substitutes per
/// [`forward_select`]. A bypass from EX/MEM is suppressed when that latch
/// holds a load, whose real result is not produced until after its memory
/// stage; the stall rule keeps consumers from reaching this case, so the
/// guard only backstops it.
pub fn apply_forwarding(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> (Word, Word) {
    let (rs1_src, rs2_src) = forward_select(id_ex, ex_mem, mem_wb);

    let pick = |source: Forward, latched: Word, operand: &str| -> Word {
        let value = match source {
            Forward::ExMem if ex_mem.instruction.op() == Op::Load => latched,
            Forward::ExMem => ex_mem.alu_result,
            Forward::MemWb => mem_wb.result,
            Forward::None => latched,
        };
        if value != latched {
            trace!(
                op = %id_ex.instruction.op(),
                operand,
                ?source,
                value,
                "forwarded operand"
            );
        }
        value
    };

    (
        pick(rs1_src, id_ex.rs1_value, "rs1"),
        pick(rs2_src, id_ex.rs2_value, "rs2"),
    )
}
