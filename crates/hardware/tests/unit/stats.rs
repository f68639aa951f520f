//! Statistics metric tests.

use pretty_assertions::assert_eq;

use pipesim_core::stats::{CacheStats, PipelineStats};

#[test]
fn cpi_handles_the_empty_run() {
    let stats = PipelineStats::default();
    assert_eq!(stats.cpi(), 0.0);

    let stats = PipelineStats {
        cycles: 9,
        instructions_completed: 4,
        ..PipelineStats::default()
    };
    assert_eq!(stats.cpi(), 2.25);
}

#[test]
fn rates_handle_the_untouched_cache() {
    let stats = CacheStats::default();
    assert_eq!(stats.hit_rate(), 0.0);
    assert_eq!(stats.miss_rate(), 0.0);

    let stats = CacheStats {
        accesses: 8,
        hits: 6,
        misses: 2,
    };
    assert_eq!(stats.hit_rate(), 0.75);
    assert_eq!(stats.miss_rate(), 0.25);
}

#[test]
fn reset_zeroes_cache_counters() {
    let mut stats = CacheStats {
        accesses: 3,
        hits: 1,
        misses: 2,
    };
    stats.reset();
    assert_eq!(stats, CacheStats::default());
}

#[test]
fn reports_render_the_counters() {
    let stats = PipelineStats {
        cycles: 9,
        instructions_completed: 4,
        stalls_inserted: 1,
        branches_taken: 1,
    };
    let rendered = stats.to_string();
    assert!(rendered.contains("sim_cycles"));
    assert!(rendered.contains("2.2500"));

    let cache = CacheStats {
        accesses: 32,
        hits: 24,
        misses: 8,
    };
    assert!(cache.to_string().contains("25.00%"));
}
