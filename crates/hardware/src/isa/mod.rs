//! Instruction set definitions.
//!
//! This module defines the seven-operation educational instruction set. It provides:
//! 1. **Operations:** The [`Op`] table with opcode bytes and format tags.
//! 2. **Instructions:** The [`Instruction`] enum, one variant per format shape.
//! 3. **Codec:** 32-bit encoding and decoding per the fixed field layout.
//! 4. **Assembler:** Line-oriented assembly of the textual mini-syntax.
//!
//! The pipeline's execute stage dispatches on [`Instruction`] variants directly;
//! the opcode/format table only serves the binary codec and the assembler.

use std::fmt;

/// Line-oriented assembler for the textual mini-syntax.
pub mod asm;

/// Binary encoder and decoder for the 32-bit instruction layout.
pub mod codec;

pub use asm::assemble;
pub use codec::{decode, encode};

/// Operation kinds understood by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Integer addition (R-form).
    Add,
    /// Integer subtraction (R-form).
    Sub,
    /// Integer multiplication (R-form).
    Mul,
    /// Load a word from data memory (I-form).
    Load,
    /// Store a word to data memory (S-form).
    Store,
    /// Branch when two registers are equal (B-form).
    Beq,
    /// Unconditional jump (J-form).
    Jump,
    /// No operation; the decode result for unknown opcodes.
    Nop,
}

/// Instruction format tags, determining the bit layout of an encoded word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Register form: `rd`, `rs1`, `rs2`.
    R,
    /// Immediate form: `rd`, `rs1`, 16-bit immediate.
    I,
    /// Store form: `rs`, 21-bit immediate.
    S,
    /// Branch form: `rs1`, `rs2`, 16-bit target.
    B,
    /// Jump form: 26-bit target.
    J,
}

impl Op {
    /// The opcode byte placed in bits 31 to 26 of an encoded word.
    ///
    /// `Nop` encodes with the reserved all-ones opcode so that it survives an
    /// encode/decode round trip without colliding with `ADD R0,R0,R0`.
    pub const fn opcode(self) -> u8 {
        match self {
            Self::Add => 0x00,
            Self::Sub => 0x01,
            Self::Mul => 0x02,
            Self::Load => 0x03,
            Self::Store => 0x04,
            Self::Beq => 0x05,
            Self::Jump => 0x06,
            Self::Nop => 0x3F,
        }
    }

    /// Looks an operation up by opcode byte.
    pub const fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0x00 => Some(Self::Add),
            0x01 => Some(Self::Sub),
            0x02 => Some(Self::Mul),
            0x03 => Some(Self::Load),
            0x04 => Some(Self::Store),
            0x05 => Some(Self::Beq),
            0x06 => Some(Self::Jump),
            _ => None,
        }
    }

    /// The format tag of this operation, or `None` for `Nop`.
    pub const fn format(self) -> Option<Format> {
        match self {
            Self::Add | Self::Sub | Self::Mul => Some(Format::R),
            Self::Load => Some(Format::I),
            Self::Store => Some(Format::S),
            Self::Beq => Some(Format::B),
            Self::Jump => Some(Format::J),
            Self::Nop => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Beq => "BEQ",
            Self::Jump => "JUMP",
            Self::Nop => "NOP",
        };
        f.write_str(name)
    }
}

/// A decoded instruction, one variant per format shape.
///
/// Register indices are in 0..32. Addresses are word indices into data
/// memory; targets are absolute instruction indices. Both are sign-extended
/// from their encoded field width, so negative values can round-trip through
/// the codec even though the pipeline treats them as out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Instruction {
    /// `rd = rs1 + rs2`
    Add {
        /// Destination register.
        rd: u8,
        /// First source register.
        rs1: u8,
        /// Second source register.
        rs2: u8,
    },
    /// `rd = rs1 - rs2`
    Sub {
        /// Destination register.
        rd: u8,
        /// First source register.
        rs1: u8,
        /// Second source register.
        rs2: u8,
    },
    /// `rd = rs1 * rs2`
    Mul {
        /// Destination register.
        rd: u8,
        /// First source register.
        rs1: u8,
        /// Second source register.
        rs2: u8,
    },
    /// `rd = memory[addr]`
    Load {
        /// Destination register.
        rd: u8,
        /// Base register carried by the encoding; implicit 0 in assembly.
        rs1: u8,
        /// Word address in data memory.
        addr: i32,
    },
    /// `memory[addr] = rs`
    Store {
        /// Source register whose value is stored.
        rs: u8,
        /// Word address in data memory.
        addr: i32,
    },
    /// `if rs1 == rs2 { pc = target }`
    Beq {
        /// First compared register.
        rs1: u8,
        /// Second compared register.
        rs2: u8,
        /// Absolute instruction index to branch to.
        target: i32,
    },
    /// `pc = target`
    Jump {
        /// Absolute instruction index to jump to.
        target: i32,
    },
    /// No effect; flows through the pipeline as a completed instruction.
    #[default]
    Nop,
}

impl Instruction {
    /// The operation kind of this instruction.
    pub const fn op(&self) -> Op {
        match self {
            Self::Add { .. } => Op::Add,
            Self::Sub { .. } => Op::Sub,
            Self::Mul { .. } => Op::Mul,
            Self::Load { .. } => Op::Load,
            Self::Store { .. } => Op::Store,
            Self::Beq { .. } => Op::Beq,
            Self::Jump { .. } => Op::Jump,
            Self::Nop => Op::Nop,
        }
    }

    /// The destination register, for operations that write one.
    pub const fn dest(&self) -> Option<u8> {
        match self {
            Self::Add { rd, .. }
            | Self::Sub { rd, .. }
            | Self::Mul { rd, .. }
            | Self::Load { rd, .. } => Some(*rd),
            _ => None,
        }
    }

    /// The declared source registers `(rs1, rs2)`.
    ///
    /// A store's data register is not a declared source: it is read at the
    /// memory stage, after any producer has written back, so it participates
    /// in neither stall detection nor forwarding.
    pub const fn sources(&self) -> (Option<u8>, Option<u8>) {
        match self {
            Self::Add { rs1, rs2, .. }
            | Self::Sub { rs1, rs2, .. }
            | Self::Mul { rs1, rs2, .. }
            | Self::Beq { rs1, rs2, .. } => (Some(*rs1), Some(*rs2)),
            Self::Load { rs1, .. } => (Some(*rs1), None),
            _ => (None, None),
        }
    }

    /// The address immediate, for memory operations.
    pub const fn immediate(&self) -> Option<i32> {
        match self {
            Self::Load { addr, .. } | Self::Store { addr, .. } => Some(*addr),
            _ => None,
        }
    }

    /// The control-flow target, for branches and jumps.
    pub const fn target(&self) -> Option<i32> {
        match self {
            Self::Beq { target, .. } | Self::Jump { target } => Some(*target),
            _ => None,
        }
    }

    /// Whether this instruction writes the register file at writeback.
    pub const fn writes_register(&self) -> bool {
        self.dest().is_some()
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction in assembly syntax, e.g. `ADD R1, R2, R3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { rd, rs1, rs2 }
            | Self::Sub { rd, rs1, rs2 }
            | Self::Mul { rd, rs1, rs2 } => {
                write!(f, "{} R{rd}, R{rs1}, R{rs2}", self.op())
            }
            Self::Load { rd, addr, .. } => write!(f, "LOAD R{rd}, {addr}"),
            Self::Store { rs, addr } => write!(f, "STORE R{rs}, {addr}"),
            Self::Beq { rs1, rs2, target } => write!(f, "BEQ R{rs1}, R{rs2}, {target}"),
            Self::Jump { target } => write!(f, "JUMP {target}"),
            Self::Nop => f.write_str("NOP"),
        }
    }
}
