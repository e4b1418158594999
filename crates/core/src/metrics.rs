//! Prometheus metrics for the resolution pipeline.

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Resolution requests by media type.
pub static RESOLVE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("riptide_resolve_requests_total", "Total resolve requests"),
        &["type"],
    )
    .unwrap()
});

/// Search queries sent to the index.
pub static SEARCH_QUERIES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "riptide_search_queries_total",
        "Total search queries sent to the torrent index",
    )
    .unwrap()
});

/// Title lookups that failed and terminated a request.
pub static LOOKUP_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "riptide_title_lookup_failures_total",
        "Total failed title provider lookups",
    )
    .unwrap()
});

/// Torrent metadata fetch/decode failures (candidate skipped).
pub static METADATA_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "riptide_metadata_failures_total",
        "Total failed torrent metadata resolutions",
    )
    .unwrap()
});

/// Queries generated per resolution.
pub static QUERIES_GENERATED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "riptide_queries_generated",
            "Search queries generated per resolve request",
        )
        .buckets(vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0]),
    )
    .unwrap()
});

/// Streams returned per resolution.
pub static STREAMS_RETURNED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "riptide_streams_returned",
            "Stream candidates returned per resolve request",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(RESOLVE_REQUESTS.clone()))
        .unwrap();
    registry.register(Box::new(SEARCH_QUERIES.clone())).unwrap();
    registry
        .register(Box::new(LOOKUP_FAILURES.clone()))
        .unwrap();
    registry
        .register(Box::new(METADATA_FAILURES.clone()))
        .unwrap();
    registry
        .register(Box::new(QUERIES_GENERATED.clone()))
        .unwrap();
    registry
        .register(Box::new(STREAMS_RETURNED.clone()))
        .unwrap();
}

/// Render all registered metrics in the Prometheus text format.
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder.encode(&REGISTRY.gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
