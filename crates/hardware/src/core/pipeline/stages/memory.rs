//! Memory access (MEM) stage.

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::latches::MemWb;
use crate::isa::Instruction;

/// Executes the memory access stage.
///
/// Loads read data memory at the effective address; out-of-range addresses
/// are skipped silently and the ALU value falls through as the result.
/// Stores read their source register directly, which observes writebacks
/// from earlier in the same tick, and write data memory in range.
pub(crate) fn memory_stage(pl: &mut Pipeline) {
    if !pl.ex_mem.valid {
        pl.mem_wb = MemWb::default();
        return;
    }

    let instruction = pl.ex_mem.instruction;
    let mut result = pl.ex_mem.alu_result;

    match instruction {
        Instruction::Load { .. } => {
            if let Some(&word) = address(pl.ex_mem.alu_result).and_then(|a| pl.data_memory.get(a)) {
                result = word;
            }
        }
        Instruction::Store { rs, .. } => {
            let value = pl.regs.read(rs);
            if let Some(slot) = address(pl.ex_mem.alu_result).and_then(|a| pl.data_memory.get_mut(a))
            {
                *slot = value;
            }
        }
        _ => {}
    }

    pl.mem_wb = MemWb {
        valid: true,
        instruction,
        result,
    };
}

/// Converts an effective address to a memory index, rejecting negatives.
fn address(alu_result: i64) -> Option<usize> {
    usize::try_from(alu_result).ok()
}
