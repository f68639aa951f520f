//! Educational five-stage pipeline simulator.
//!
//! This crate implements a cycle-accurate simulator of a classic in-order
//! processor and its surroundings:
//! 1. **Core:** Five-stage pipeline (fetch, decode, execute, memory,
//!    writeback) with valid-flag latches, load-use stall detection, operand
//!    forwarding, and one-cycle branch flushes.
//! 2. **ISA:** A seven-operation instruction set with a 32-bit binary codec
//!    and a line-oriented assembler.
//! 3. **Caches:** Direct-mapped and 2-way set-associative LRU caches,
//!    write-through with write-allocate, over a seeded pseudo-random main
//!    memory. Driven by address streams, independent of the pipeline.
//! 4. **I/O:** A bounded-FIFO device with a temperature sensor feeding it,
//!    serviced by a polling controller or an interrupt controller.
//! 5. **Observability:** Per-component counters and `tracing` events.
//!
//! Time in the core is discrete simulator cycles; only the I/O subsystem
//! uses wall-clock durations.

/// Cache hierarchy: address decomposition, direct-mapped and 2-way caches.
pub mod cache;
/// Shared types: machine word, constants, registers, errors, randomness.
pub mod common;
/// Simulator configuration (defaults, structures, JSON loading).
pub mod config;
/// Processor core: pipeline, latches, hazard unit, ALU.
pub mod core;
/// I/O subsystem: devices, sensor, polling and interrupt controllers.
pub mod io;
/// Instruction set: operations, instructions, codec, assembler.
pub mod isa;
/// Pipeline and cache statistics.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The pipelined processor; owns registers, memories, and latches.
pub use crate::core::Pipeline;
/// Decoded instruction, one variant per format shape.
pub use crate::isa::Instruction;
