//! Line-oriented assembler for the textual mini-syntax.
//!
//! One instruction per line; blank lines and lines starting with `#` are
//! skipped. Register operands are `R<n>` with a decimal index, addresses and
//! targets are decimal integers. Operands are comma-separated; whitespace
//! around commas is tolerated.
//!
//! ```text
//! # compute and store
//! ADD R1, R2, R3
//! STORE R1, 100
//! LOAD R4, 100
//! BEQ R1, R4, 5
//! JUMP 0
//! ```

use crate::common::AsmError;
use crate::common::constants::NUM_REGISTERS;
use crate::isa::Instruction;

/// Assembles a program text into a sequence of decoded instructions.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered, carrying the offending
/// 1-based line number.
pub fn assemble(text: &str) -> Result<Vec<Instruction>, AsmError> {
    let mut program = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        program.push(assemble_line(trimmed, line)?);
    }
    Ok(program)
}

/// Assembles a single non-empty, non-comment line.
fn assemble_line(text: &str, line: usize) -> Result<Instruction, AsmError> {
    let (mnemonic, rest) = match text.split_once(char::is_whitespace) {
        Some((m, r)) => (m, r),
        None => (text, ""),
    };
    let mnemonic = mnemonic.to_ascii_uppercase();
    let operands: Vec<&str> = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let expect = |count: usize| -> Result<(), AsmError> {
        if operands.len() == count {
            Ok(())
        } else {
            Err(AsmError::OperandCount {
                line,
                mnemonic: mnemonic.clone(),
                expected: count,
                found: operands.len(),
            })
        }
    };

    match mnemonic.as_str() {
        "ADD" | "SUB" | "MUL" => {
            expect(3)?;
            let rd = register(operands[0], line)?;
            let rs1 = register(operands[1], line)?;
            let rs2 = register(operands[2], line)?;
            Ok(match mnemonic.as_str() {
                "ADD" => Instruction::Add { rd, rs1, rs2 },
                "SUB" => Instruction::Sub { rd, rs1, rs2 },
                _ => Instruction::Mul { rd, rs1, rs2 },
            })
        }
        "LOAD" => {
            expect(2)?;
            Ok(Instruction::Load {
                rd: register(operands[0], line)?,
                rs1: 0,
                addr: integer(operands[1], line)?,
            })
        }
        "STORE" => {
            expect(2)?;
            Ok(Instruction::Store {
                rs: register(operands[0], line)?,
                addr: integer(operands[1], line)?,
            })
        }
        "BEQ" => {
            expect(3)?;
            Ok(Instruction::Beq {
                rs1: register(operands[0], line)?,
                rs2: register(operands[1], line)?,
                target: integer(operands[2], line)?,
            })
        }
        "JUMP" => {
            expect(1)?;
            Ok(Instruction::Jump {
                target: integer(operands[0], line)?,
            })
        }
        "NOP" => {
            expect(0)?;
            Ok(Instruction::Nop)
        }
        _ => Err(AsmError::UnknownMnemonic { line, mnemonic }),
    }
}

/// Parses a register token of the form `R<n>` with `n` in 0..32.
fn register(token: &str, line: usize) -> Result<u8, AsmError> {
    let bad = || AsmError::BadRegister {
        line,
        token: token.to_string(),
    };
    let digits = token
        .strip_prefix('R')
        .or_else(|| token.strip_prefix('r'))
        .ok_or_else(bad)?;
    let idx: usize = digits.parse().map_err(|_| bad())?;
    if idx < NUM_REGISTERS {
        Ok(idx as u8)
    } else {
        Err(bad())
    }
}

/// Parses a decimal address or target operand.
fn integer(token: &str, line: usize) -> Result<i32, AsmError> {
    token.parse().map_err(|_| AsmError::BadInteger {
        line,
        token: token.to_string(),
    })
}
