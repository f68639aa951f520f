//! Assembler and configuration error definitions.
//!
//! The simulation core itself is infallible: malformed instructions degenerate
//! to no-ops and out-of-range memory accesses are skipped. Errors only arise at
//! the outer surfaces, when parsing assembly text or configuration input.

use thiserror::Error;

/// Errors produced while assembling program text.
///
/// Each variant carries the 1-based source line the problem was found on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AsmError {
    /// The mnemonic at the start of a line is not part of the instruction set.
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// 1-based source line number.
        line: usize,
        /// The offending mnemonic as written.
        mnemonic: String,
    },

    /// A register operand is not of the form `R<n>` with `n` in 0..32.
    #[error("line {line}: bad register token `{token}`")]
    BadRegister {
        /// 1-based source line number.
        line: usize,
        /// The offending operand as written.
        token: String,
    },

    /// An address or target operand is not a decimal integer.
    #[error("line {line}: bad integer `{token}`")]
    BadInteger {
        /// 1-based source line number.
        line: usize,
        /// The offending operand as written.
        token: String,
    },

    /// A line carries the wrong number of operands for its mnemonic.
    #[error("line {line}: `{mnemonic}` expects {expected} operands, found {found}")]
    OperandCount {
        /// 1-based source line number.
        line: usize,
        /// The mnemonic being assembled.
        mnemonic: String,
        /// Operands required by the format.
        expected: usize,
        /// Operands actually present.
        found: usize,
    },
}

/// Errors produced while loading simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
