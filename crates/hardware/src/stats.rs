//! Simulation statistics collection and reporting.
//!
//! This module tracks the performance counters of the simulator. It provides:
//! 1. **Pipeline counters:** Cycles, completed instructions, stalls, taken branches,
//!    and the derived CPI metric.
//! 2. **Cache counters:** Accesses, hits, misses, and derived hit/miss rates.
//!
//! Both structures are plain copyable counter blocks owned by their component
//! and returned by value from its `stats` accessor.

use std::fmt;

/// Pipeline execution counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions that reached writeback, including stores and branches.
    pub instructions_completed: u64,
    /// Bubbles inserted to resolve load-use hazards.
    pub stalls_inserted: u64,
    /// Taken conditional branches and jumps.
    pub branches_taken: u64,
}

impl PipelineStats {
    /// Cycles per completed instruction.
    ///
    /// Returns 0 when no instruction has completed yet.
    pub fn cpi(&self) -> f64 {
        if self.instructions_completed == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_completed as f64
        }
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_completed)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "stalls.load_use          {}", self.stalls_inserted)?;
        write!(f, "branches.taken           {}", self.branches_taken)
    }
}

/// Cache access counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total reads and writes observed.
    pub accesses: u64,
    /// Accesses that found the block resident.
    pub hits: u64,
    /// Accesses that required a fill from main memory.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit, in `[0, 1]`.
    ///
    /// Returns 0 when no access has been observed yet.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that missed, in `[0, 1]`.
    ///
    /// Returns 0 when no access has been observed yet.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            1.0 - self.hit_rate()
        }
    }

    /// Zeroes all three counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
            self.accesses,
            self.hits,
            self.miss_rate() * 100.0
        )
    }
}
