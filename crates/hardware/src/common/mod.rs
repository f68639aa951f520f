//! Shared types and helpers used across the simulator.
//!
//! This module provides the building blocks the other subsystems share:
//! 1. **Word type:** The machine word stored in registers, data memory, and caches.
//! 2. **Constants:** Architectural sizes and instruction field layout.
//! 3. **Registers:** The general-purpose register file with `R0` hardwired to zero.
//! 4. **Errors:** Assembler and configuration error types.
//! 5. **Randomness:** A small seedable generator for reproducible simulations.

/// Architectural sizes and instruction encoding field layout.
pub mod constants;

/// Assembler and configuration error types.
pub mod error;

/// General-purpose register file.
pub mod reg;

/// Seedable xorshift pseudo-random number generator.
pub mod rng;

pub use error::{AsmError, ConfigError};
pub use reg::RegFile;
pub use rng::XorShift64;

/// Machine word held in registers, data memory, and cache blocks.
///
/// Wide enough that products of plausible operands do not overflow;
/// arithmetic wraps on the rare traces that do.
pub type Word = i64;
