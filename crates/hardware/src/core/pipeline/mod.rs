//! Five-stage in-order pipeline.
//!
//! This module implements the pipelined datapath. It provides:
//! 1. **State:** Program counter, register file, flat data memory, instruction
//!    memory, and the four inter-stage latches.
//! 2. **Cycle semantics:** [`Pipeline::step`] advances exactly one cycle,
//!    evaluating the stages in reverse order (WB, MEM, EX, ID, IF). Each stage
//!    writes only its downstream latch, so reverse evaluation guarantees that
//!    no stage overwrites an input another stage has not yet consumed.
//! 3. **Hazard resolution:** Load-use hazards stall for one cycle; remaining
//!    Read-After-Write hazards are forwarded; taken branches and jumps flush
//!    the front of the pipeline with a one-cycle penalty.
//!
//! One exception to "reads observe cycle-start state" needs care: the memory
//! stage overwrites the MEM/WB latch before execute runs, while forwarding
//! must see the latch as the previous cycle left it. [`Pipeline::step`]
//! snapshots MEM/WB at the top of the tick and execute forwards from the
//! snapshot.

use tracing::trace;

/// Pure hazard detection and forwarding queries.
pub mod hazards;

/// Inter-stage latch definitions.
pub mod latches;

mod stages;

use crate::common::constants::DATA_MEMORY_WORDS;
use crate::common::{RegFile, Word};
use crate::isa::Instruction;
use crate::stats::PipelineStats;
use latches::{ExMem, IdEx, IfId, MemWb};

/// The pipelined processor.
///
/// Owns all architectural and microarchitectural state for the duration of a
/// simulation: 32 registers, a 1024-word data memory, the loaded program, and
/// the four latches. Construct with [`Pipeline::new`], install a program with
/// [`Pipeline::load_program`], then drive it with [`Pipeline::step`] or
/// [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    pc: usize,
    regs: RegFile,
    data_memory: Vec<Word>,
    instructions: Vec<Instruction>,

    if_id: IfId,
    id_ex: IdEx,
    ex_mem: ExMem,
    mem_wb: MemWb,
    /// MEM/WB as the previous cycle left it; forwarding source for execute.
    mem_wb_snapshot: MemWb,

    stall_flag: bool,
    flush_flag: bool,
    stats: PipelineStats,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Creates a pipeline with zeroed registers and data memory and no program.
    pub fn new() -> Self {
        Self {
            pc: 0,
            regs: RegFile::new(),
            data_memory: vec![0; DATA_MEMORY_WORDS],
            instructions: Vec::new(),
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            mem_wb_snapshot: MemWb::default(),
            stall_flag: false,
            flush_flag: false,
            stats: PipelineStats::default(),
        }
    }

    /// Installs a program and resets the pipeline state.
    ///
    /// Clears the program counter, latches, flags, and counters. Register and
    /// data memory contents are left in place so callers can seed them before
    /// or after loading.
    pub fn load_program(&mut self, instructions: Vec<Instruction>) {
        self.instructions = instructions;
        self.reset();
    }

    /// Resets the program counter, latches, flags, and counters.
    ///
    /// The loaded program, register values, and data memory survive a reset.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.if_id = IfId::default();
        self.id_ex = IdEx::default();
        self.ex_mem = ExMem::default();
        self.mem_wb = MemWb::default();
        self.mem_wb_snapshot = MemWb::default();
        self.stall_flag = false;
        self.flush_flag = false;
        self.stats = PipelineStats::default();
    }

    /// Advances the pipeline by exactly one cycle.
    pub fn step(&mut self) {
        self.stats.cycles += 1;
        self.mem_wb_snapshot = self.mem_wb.clone();

        stages::writeback::writeback_stage(self);
        stages::memory::memory_stage(self);
        stages::execute::execute_stage(self);
        stages::decode::decode_stage(self);
        stages::fetch::fetch_stage(self);

        // A flush lasts one cycle: decode and fetch have already observed it.
        self.flush_flag = false;
    }

    /// Runs until the pipeline drains or `max_cycles` further cycles elapse.
    ///
    /// The pipeline is drained when every latch is invalid and the program
    /// counter is past the end of the program.
    pub fn run(&mut self, max_cycles: Option<u64>) -> PipelineStats {
        let mut executed = 0;
        while !self.is_drained() {
            if let Some(limit) = max_cycles {
                if executed >= limit {
                    break;
                }
            }
            self.step();
            executed += 1;
        }
        self.stats
    }

    /// Whether every latch is invalid and the program counter is past the end.
    pub fn is_drained(&self) -> bool {
        !self.if_id.valid
            && !self.id_ex.valid
            && !self.ex_mem.valid
            && !self.mem_wb.valid
            && self.pc >= self.instructions.len()
    }

    /// Execution counters accumulated since the last reset.
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Reads a register.
    pub fn register(&self, idx: u8) -> Word {
        self.regs.read(idx)
    }

    /// Writes a register; writes to `R0` are discarded.
    pub fn set_register(&mut self, idx: u8, value: Word) {
        self.regs.write(idx, value);
    }

    /// The flat data memory.
    pub fn memory(&self) -> &[Word] {
        &self.data_memory
    }

    /// Mutable access to the flat data memory, for seeding test fixtures.
    pub fn memory_mut(&mut self) -> &mut [Word] {
        &mut self.data_memory
    }

    /// Redirects control flow to `target` and flushes the pipeline front.
    ///
    /// Negative targets clamp to 0; targets past the end of the program
    /// simply drain the pipeline.
    fn redirect(&mut self, target: i32) {
        self.pc = usize::try_from(target).unwrap_or(0);
        self.flush_flag = true;
        self.stats.branches_taken += 1;
        trace!(new_pc = self.pc, "control redirect, flushing front of pipeline");
    }
}
