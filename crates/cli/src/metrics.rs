//! Prometheus metrics export.

use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

fn register_metrics(registry: &Registry) {
    for metric in static_deploy_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_deploy_core::metrics::{UNITS_COMPLETED, UNITS_LAUNCHED};

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        UNITS_LAUNCHED.inc();
        UNITS_COMPLETED.with_label_values(&["success"]).inc();

        let output = encode_metrics();
        assert!(output.contains("static_deploy_units_launched_total"));
        assert!(output.contains("static_deploy_units_completed_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }
}
