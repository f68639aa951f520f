//! Direct-mapped cache.
//!
//! Each main-memory block maps to exactly one cache line, so lookup is a
//! single tag compare and there is no replacement decision to make.

use crate::cache::{AddressLayout, CacheBlock, MainMemory};
use crate::common::Word;
use crate::config::DirectCacheConfig;
use crate::stats::CacheStats;

/// A direct-mapped, write-through, write-allocate cache.
#[derive(Debug, Clone)]
pub struct DirectMappedCache {
    layout: AddressLayout,
    lines: Vec<CacheBlock>,
    memory: MainMemory,
    stats: CacheStats,
    block_size: usize,
}

impl DirectMappedCache {
    /// Default seed for the pseudo-random main-memory fill.
    const DEFAULT_SEED: u64 = 0xB10C_F111;

    /// Creates a cache with the given geometry over a default-seeded memory.
    ///
    /// `block_size` and `num_lines` must be powers of two.
    pub fn new(block_size: usize, num_lines: usize, memory_size: usize) -> Self {
        Self::with_seed(block_size, num_lines, memory_size, Self::DEFAULT_SEED)
    }

    /// Creates a cache whose main memory is filled from an explicit seed.
    pub fn with_seed(block_size: usize, num_lines: usize, memory_size: usize, seed: u64) -> Self {
        Self {
            layout: AddressLayout::new(block_size, num_lines),
            lines: (0..num_lines).map(|_| CacheBlock::new(block_size)).collect(),
            memory: MainMemory::with_seed(memory_size, seed),
            stats: CacheStats::default(),
            block_size,
        }
    }

    /// Creates a cache from a configuration block.
    pub fn from_config(config: &DirectCacheConfig) -> Self {
        Self::with_seed(
            config.block_size,
            config.num_lines,
            config.memory_size,
            config.seed,
        )
    }

    /// Reads the word at `addr`, filling the mapped line on a miss.
    pub fn read(&mut self, addr: usize) -> Word {
        self.stats.accesses += 1;
        let (tag, index, offset) = self.layout.split(addr);

        if self.lines[index].valid && self.lines[index].tag == tag {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            self.fill(index, tag);
        }
        self.lines[index].data[offset]
    }

    /// Writes the word at `addr`.
    ///
    /// Write-through with write-allocate: a miss fills the mapped line first,
    /// then the word is stored both in the line and in main memory.
    pub fn write(&mut self, addr: usize, value: Word) {
        self.stats.accesses += 1;
        let (tag, index, offset) = self.layout.split(addr);

        if self.lines[index].valid && self.lines[index].tag == tag {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            self.fill(index, tag);
        }
        self.lines[index].data[offset] = value;
        self.memory.write(addr, value);
    }

    /// Loads the block identified by `tag` into line `index`.
    fn fill(&mut self, index: usize, tag: usize) {
        let base = self.layout.block_base(tag, index);
        let line = &mut self.lines[index];
        self.memory.fill_block(line, base);
        line.tag = tag;
        line.valid = true;
    }

    /// Access counters since construction or the last reset.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zeroes the access counters; cache contents are untouched.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Words per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of cache lines.
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// The cache line at `index`.
    pub fn line(&self, index: usize) -> &CacheBlock {
        &self.lines[index]
    }

    /// The backing main memory.
    pub fn memory(&self) -> &MainMemory {
        &self.memory
    }
}
