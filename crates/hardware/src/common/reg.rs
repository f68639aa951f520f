//! General-purpose register file.
//!
//! This module implements the register file shared by all instructions.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`R0` through `R31`).
//! 2. **Invariant enforcement:** Ensures that register `R0` is hardwired to zero.
//! 3. **Debugging:** Provides a utility for dumping the complete register state.

use super::Word;
use super::constants::NUM_REGISTERS;

/// General-purpose register file.
///
/// Contains 32 registers. Register `R0` is hardwired to zero; writes to it
/// are discarded.
#[derive(Clone, Debug)]
pub struct RegFile {
    regs: [Word; NUM_REGISTERS],
}

impl Default for RegFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegFile {
    /// Creates a register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The word stored in the register. Register `R0` always returns 0.
    pub fn read(&self, idx: u8) -> Word {
        if idx == 0 { 0 } else { self.regs[idx as usize] }
    }

    /// Writes a value to a register.
    ///
    /// Writes to `R0` are silently discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The word to write.
    pub fn write(&mut self, idx: u8, val: Word) {
        if idx != 0 {
            self.regs[idx as usize] = val;
        }
    }

    /// Dumps the contents of all registers to stdout.
    ///
    /// Displays registers in pairs for debugging purposes.
    pub fn dump(&self) {
        for i in (0..NUM_REGISTERS).step_by(2) {
            println!(
                "R{:<2}={:<12} R{:<2}={:<12}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}
