//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! standalone subsystems. It provides:
//! 1. **Defaults:** Baseline constants (memory size, cache geometry, sensor rates).
//! 2. **Structures:** Per-subsystem config for the two caches and the sensor.
//! 3. **Loading:** JSON deserialization via `Config::from_json`.
//!
//! The pipeline itself takes no parameters: it is fixed at 32 registers and a
//! 1024-word data memory.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Size of a cache main memory in words.
    pub const MEMORY_WORDS: usize = 1024;

    /// Words per cache block.
    pub const BLOCK_WORDS: usize = 4;

    /// Lines in the direct-mapped cache.
    pub const DIRECT_LINES: usize = 16;

    /// Sets in the 2-way set-associative cache (two lines per set).
    pub const ASSOC_SETS: usize = 8;

    /// Seed for the pseudo-random fill of a cache main memory.
    pub const MEMORY_SEED: u64 = 0xB10C_F111;

    /// Device FIFO capacity in entries.
    pub const FIFO_CAPACITY: usize = 16;

    /// Lower bound of generated sensor readings, in degrees Celsius.
    pub const TEMP_MIN: f64 = 15.0;

    /// Upper bound of generated sensor readings, in degrees Celsius.
    pub const TEMP_MAX: f64 = 35.0;

    /// Milliseconds between generated sensor readings.
    pub const READ_INTERVAL_MS: u64 = 1000;

    /// Seed for the sensor reading generator.
    pub const SENSOR_SEED: u64 = 0x5E25_0D07;
}

/// Geometry of the direct-mapped cache.
///
/// `block_size` and `num_lines` must be powers of two; the caches assume
/// valid shapes and do not validate them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectCacheConfig {
    /// Words per cache block.
    pub block_size: usize,
    /// Number of cache lines.
    pub num_lines: usize,
    /// Size of the backing main memory in words.
    pub memory_size: usize,
    /// Seed for the pseudo-random main memory fill.
    pub seed: u64,
}

impl Default for DirectCacheConfig {
    fn default() -> Self {
        Self {
            block_size: defaults::BLOCK_WORDS,
            num_lines: defaults::DIRECT_LINES,
            memory_size: defaults::MEMORY_WORDS,
            seed: defaults::MEMORY_SEED,
        }
    }
}

/// Geometry of the 2-way set-associative cache.
///
/// `block_size` and `num_sets` must be powers of two.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TwoWayCacheConfig {
    /// Words per cache block.
    pub block_size: usize,
    /// Number of sets, each holding two ways.
    pub num_sets: usize,
    /// Size of the backing main memory in words.
    pub memory_size: usize,
    /// Seed for the pseudo-random main memory fill.
    pub seed: u64,
}

impl Default for TwoWayCacheConfig {
    fn default() -> Self {
        Self {
            block_size: defaults::BLOCK_WORDS,
            num_sets: defaults::ASSOC_SETS,
            memory_size: defaults::MEMORY_WORDS,
            seed: defaults::MEMORY_SEED,
        }
    }
}

/// Temperature sensor parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Device name, also used in log events.
    pub name: String,
    /// Lower bound of generated readings, in degrees Celsius.
    pub temp_min: f64,
    /// Upper bound of generated readings, in degrees Celsius.
    pub temp_max: f64,
    /// FIFO capacity of the underlying device.
    pub buffer_size: usize,
    /// Milliseconds between generated readings.
    pub interval_ms: u64,
    /// Seed for the reading generator.
    pub seed: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            name: String::from("temperature-sensor"),
            temp_min: defaults::TEMP_MIN,
            temp_max: defaults::TEMP_MAX,
            buffer_size: defaults::FIFO_CAPACITY,
            interval_ms: defaults::READ_INTERVAL_MS,
            seed: defaults::SENSOR_SEED,
        }
    }
}

/// Root configuration.
///
/// Use [`Config::default`] for the documented baseline or deserialize from
/// JSON with [`Config::from_json`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Direct-mapped cache geometry.
    pub direct_cache: DirectCacheConfig,
    /// 2-way set-associative cache geometry.
    pub two_way_cache: TwoWayCacheConfig,
    /// Temperature sensor parameters.
    pub sensor: SensorConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
