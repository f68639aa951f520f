//! Execute (EX) stage.

use crate::core::pipeline::latches::ExMem;
use crate::core::pipeline::{Pipeline, hazards};
use crate::core::units::alu;
use crate::isa::Instruction;

/// Executes the execute stage.
///
/// Obtains effective operand values from the forwarding unit, computes the
/// ALU result or effective address, and resolves control flow. A taken
/// branch or jump redirects the program counter and raises the flush flag;
/// decode and fetch observe the flag later in the same tick.
///
/// Forwarding from MEM/WB reads the snapshot taken at the start of the tick:
/// the memory stage has already overwritten the live latch by the time this
/// stage runs.
pub(crate) fn execute_stage(pl: &mut Pipeline) {
    if !pl.id_ex.valid {
        pl.ex_mem = ExMem::default();
        return;
    }

    let instruction = pl.id_ex.instruction;
    let (rs1_value, rs2_value) =
        hazards::apply_forwarding(&pl.id_ex, &pl.ex_mem, &pl.mem_wb_snapshot);

    let alu_result = match instruction {
        Instruction::Add { .. } | Instruction::Sub { .. } | Instruction::Mul { .. } => {
            alu::execute(instruction.op(), rs1_value, rs2_value)
        }
        Instruction::Load { .. } | Instruction::Store { .. } => pl.id_ex.immediate,
        Instruction::Beq { target, .. } => {
            let taken = rs1_value == rs2_value;
            if taken {
                pl.redirect(target);
            }
            i64::from(taken)
        }
        Instruction::Jump { target } => {
            pl.redirect(target);
            0
        }
        Instruction::Nop => 0,
    };

    pl.ex_mem = ExMem {
        valid: true,
        instruction,
        alu_result,
        rs2_value,
    };
}
