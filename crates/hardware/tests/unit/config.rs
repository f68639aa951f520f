//! Configuration loading tests.

use pretty_assertions::assert_eq;

use pipesim_core::Config;
use pipesim_core::cache::{DirectMappedCache, TwoWaySetAssociativeCache};

#[test]
fn defaults_match_the_documented_baseline() {
    let config = Config::default();
    assert_eq!(config.direct_cache.block_size, 4);
    assert_eq!(config.direct_cache.num_lines, 16);
    assert_eq!(config.direct_cache.memory_size, 1024);
    assert_eq!(config.two_way_cache.num_sets, 8);
    assert_eq!(config.two_way_cache.memory_size, 1024);
    assert_eq!(config.sensor.buffer_size, 16);
    assert_eq!(config.sensor.temp_min, 15.0);
    assert_eq!(config.sensor.temp_max, 35.0);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let config = match Config::from_json(
        r#"{ "direct_cache": { "block_size": 8 }, "sensor": { "interval_ms": 50 } }"#,
    ) {
        Ok(config) => config,
        Err(error) => panic!("parse failed: {error}"),
    };
    assert_eq!(config.direct_cache.block_size, 8);
    assert_eq!(config.direct_cache.num_lines, 16, "untouched field keeps its default");
    assert_eq!(config.sensor.interval_ms, 50);
    assert_eq!(config.sensor.buffer_size, 16);
}

#[test]
fn malformed_json_is_reported() {
    assert!(Config::from_json("{ not json").is_err());
    assert!(Config::from_json(r#"{ "sensor": { "buffer_size": "big" } }"#).is_err());
}

#[test]
fn caches_build_from_configuration() {
    let config = match Config::from_json(
        r#"{
            "direct_cache": { "block_size": 2, "num_lines": 4, "memory_size": 64, "seed": 1 },
            "two_way_cache": { "block_size": 2, "num_sets": 2, "memory_size": 64, "seed": 1 }
        }"#,
    ) {
        Ok(config) => config,
        Err(error) => panic!("parse failed: {error}"),
    };

    let mut direct = DirectMappedCache::from_config(&config.direct_cache);
    assert_eq!(direct.block_size(), 2);
    assert_eq!(direct.num_lines(), 4);
    let _ = direct.read(0);
    assert_eq!(direct.stats().misses, 1);

    let mut two_way = TwoWaySetAssociativeCache::from_config(&config.two_way_cache);
    assert_eq!(two_way.block_size(), 2);
    assert_eq!(two_way.num_sets(), 2);
    // Identical seeds produce identical backing memories.
    assert_eq!(two_way.read(0), direct.read(0));
}
