//! Arithmetic Logic Unit.
//!
//! Computes results for the three arithmetic operations. Memory and
//! control-flow operations do not go through the ALU: the execute stage
//! computes their address or comparison inline.

use crate::common::Word;
use crate::isa::Op;

/// Computes the result of an arithmetic operation.
///
/// Arithmetic wraps on overflow. Non-arithmetic operations yield 0; the
/// execute stage never asks for them.
pub fn execute(op: Op, lhs: Word, rhs: Word) -> Word {
    match op {
        Op::Add => lhs.wrapping_add(rhs),
        Op::Sub => lhs.wrapping_sub(rhs),
        Op::Mul => lhs.wrapping_mul(rhs),
        _ => 0,
    }
}
