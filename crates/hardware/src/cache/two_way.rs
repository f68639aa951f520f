//! 2-way set-associative cache with LRU replacement.
//!
//! Each set holds two ways. A global counter increments on every access and
//! stamps the touched way, so the way with the smaller stamp in a set is
//! always the least recently used.

use crate::cache::{AddressLayout, CacheBlock, MainMemory};
use crate::common::Word;
use crate::config::TwoWayCacheConfig;
use crate::stats::CacheStats;

/// Ways per set.
const WAYS: usize = 2;

/// A 2-way set-associative, write-through, write-allocate cache with LRU
/// replacement.
#[derive(Debug, Clone)]
pub struct TwoWaySetAssociativeCache {
    layout: AddressLayout,
    /// `num_sets * WAYS` blocks; set `s` occupies `s * WAYS .. (s + 1) * WAYS`.
    blocks: Vec<CacheBlock>,
    memory: MainMemory,
    stats: CacheStats,
    block_size: usize,
    num_sets: usize,
    /// Monotonic access counter; the LRU stamp source.
    global_counter: u64,
}

impl TwoWaySetAssociativeCache {
    /// Default seed for the pseudo-random main-memory fill.
    const DEFAULT_SEED: u64 = 0xB10C_F111;

    /// Creates a cache with the given geometry over a default-seeded memory.
    ///
    /// `block_size` and `num_sets` must be powers of two.
    pub fn new(block_size: usize, num_sets: usize, memory_size: usize) -> Self {
        Self::with_seed(block_size, num_sets, memory_size, Self::DEFAULT_SEED)
    }

    /// Creates a cache whose main memory is filled from an explicit seed.
    pub fn with_seed(block_size: usize, num_sets: usize, memory_size: usize, seed: u64) -> Self {
        Self {
            layout: AddressLayout::new(block_size, num_sets),
            blocks: (0..num_sets * WAYS)
                .map(|_| CacheBlock::new(block_size))
                .collect(),
            memory: MainMemory::with_seed(memory_size, seed),
            stats: CacheStats::default(),
            block_size,
            num_sets,
            global_counter: 0,
        }
    }

    /// Creates a cache from a configuration block.
    pub fn from_config(config: &TwoWayCacheConfig) -> Self {
        Self::with_seed(
            config.block_size,
            config.num_sets,
            config.memory_size,
            config.seed,
        )
    }

    /// Reads the word at `addr`, filling a way on a miss.
    pub fn read(&mut self, addr: usize) -> Word {
        let slot = self.access(addr);
        let (_, _, offset) = self.layout.split(addr);
        self.blocks[slot].data[offset]
    }

    /// Writes the word at `addr`.
    ///
    /// Write-through with write-allocate: a miss fills a way first, then the
    /// word is stored both in the way and in main memory.
    pub fn write(&mut self, addr: usize, value: Word) {
        let slot = self.access(addr);
        let (_, _, offset) = self.layout.split(addr);
        self.blocks[slot].data[offset] = value;
        self.memory.write(addr, value);
    }

    /// Common lookup-or-fill path; returns the block slot holding `addr`.
    ///
    /// The global counter increments first on every access, and the touched
    /// way (the matching way on a hit, the filled way on a miss) is stamped
    /// with it.
    fn access(&mut self, addr: usize) -> usize {
        self.stats.accesses += 1;
        self.global_counter += 1;
        let (tag, index, _) = self.layout.split(addr);

        if let Some(slot) = self.lookup(index, tag) {
            self.stats.hits += 1;
            self.blocks[slot].lru_counter = self.global_counter;
            return slot;
        }

        self.stats.misses += 1;
        let slot = index * WAYS + self.victim_way(index);
        let base = self.layout.block_base(tag, index);
        let stamp = self.global_counter;
        let memory = &self.memory;
        let block = &mut self.blocks[slot];
        memory.fill_block(block, base);
        block.tag = tag;
        block.valid = true;
        block.lru_counter = stamp;
        slot
    }

    /// Scans the two ways of a set for a resident tag.
    fn lookup(&self, index: usize, tag: usize) -> Option<usize> {
        let base = index * WAYS;
        (base..base + WAYS).find(|&slot| self.blocks[slot].valid && self.blocks[slot].tag == tag)
    }

    /// Picks the way to fill on a miss: any invalid way first, otherwise the
    /// way with the smaller LRU stamp. Ties break toward the lower way index.
    fn victim_way(&self, index: usize) -> usize {
        let base = index * WAYS;
        for way in 0..WAYS {
            if !self.blocks[base + way].valid {
                return way;
            }
        }
        let mut victim = 0;
        let mut oldest = self.blocks[base].lru_counter;
        for way in 1..WAYS {
            if self.blocks[base + way].lru_counter < oldest {
                oldest = self.blocks[base + way].lru_counter;
                victim = way;
            }
        }
        victim
    }

    /// Access counters since construction or the last reset.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zeroes the access counters; cache contents and LRU state are untouched.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Words per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// The block in `set` at `way`.
    pub fn way(&self, set: usize, way: usize) -> &CacheBlock {
        &self.blocks[set * WAYS + way]
    }

    /// The backing main memory.
    pub fn memory(&self) -> &MainMemory {
        &self.memory
    }
}
