//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Scheduler (launched units, results, active workers, durations)
//! - Resolution (deploy plan sizes)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Scheduler Metrics
// =============================================================================

/// Work units launched total.
pub static UNITS_LAUNCHED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("static_deploy_units_launched_total", "Total work units launched").unwrap()
});

/// Work units completed total by result.
pub static UNITS_COMPLETED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "static_deploy_units_completed_total",
            "Total work units completed",
        ),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

/// Workers currently running.
pub static ACTIVE_WORKERS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "static_deploy_active_workers",
        "Number of work units currently being deployed",
    )
    .unwrap()
});

/// Work unit duration in seconds.
pub static UNIT_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "static_deploy_unit_duration_seconds",
            "Duration of a single work unit deployment",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Resolution Metrics
// =============================================================================

/// Work units enumerated per invocation.
pub static UNITS_PLANNED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "static_deploy_units_planned",
        "Number of work units enumerated for the current invocation",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Label for a unit status.
pub fn result_label(status: i32) -> &'static str {
    if status == 0 {
        "success"
    } else {
        "failed"
    }
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Scheduler
        Box::new(UNITS_LAUNCHED.clone()),
        Box::new(UNITS_COMPLETED.clone()),
        Box::new(ACTIVE_WORKERS.clone()),
        Box::new(UNIT_DURATION.clone()),
        // Resolution
        Box::new(UNITS_PLANNED.clone()),
    ]
}
