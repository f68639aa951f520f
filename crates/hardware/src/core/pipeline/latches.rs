//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the buffers that connect the five stages of the
//! pipeline. Each latch carries a `valid` flag alongside its payload: an
//! invalid latch is a bubble, and every consuming stage must check the flag
//! before reading payload fields. `Default` produces a bubble, which is also
//! how stalls and flushes squash in-flight work.

use crate::common::Word;
use crate::isa::Instruction;

/// IF/ID pipeline latch (fetch to decode).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IfId {
    /// Whether the latch holds an instruction; `false` marks a bubble.
    pub valid: bool,
    /// The fetched instruction.
    pub instruction: Instruction,
    /// Instruction index the instruction was fetched from.
    pub pc: usize,
}

/// ID/EX pipeline latch (decode to execute).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdEx {
    /// Whether the latch holds an instruction; `false` marks a bubble.
    pub valid: bool,
    /// The decoded instruction.
    pub instruction: Instruction,
    /// Value read from the first source register, 0 when absent.
    pub rs1_value: Word,
    /// Value read from the second source register, 0 when absent.
    pub rs2_value: Word,
    /// Address immediate extracted at decode, 0 when absent.
    pub immediate: Word,
}

/// EX/MEM pipeline latch (execute to memory).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExMem {
    /// Whether the latch holds an instruction; `false` marks a bubble.
    pub valid: bool,
    /// The executed instruction.
    pub instruction: Instruction,
    /// ALU result, or the effective address for memory operations.
    pub alu_result: Word,
    /// Second source value carried along as store data.
    pub rs2_value: Word,
}

/// MEM/WB pipeline latch (memory to writeback).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemWb {
    /// Whether the latch holds an instruction; `false` marks a bubble.
    pub valid: bool,
    /// The instruction about to retire.
    pub instruction: Instruction,
    /// Final result: loaded data for loads, the ALU value otherwise.
    pub result: Word,
}
