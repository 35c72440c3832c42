//! Logging and metrics setup

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// Logs go to stderr so `classify --json` output stays parseable.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("hamcaller=debug,hamcaller_server=debug,hamcaller_classifiers=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("hamcaller=info,hamcaller_server=info,hamcaller_classifiers=info,tower_http=warn")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Install the Prometheus recorder and return its handle for rendering
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "hamcaller_requests_total",
        "Total number of transcripts received"
    );
    metrics::describe_counter!(
        "hamcaller_verdicts_total",
        "Verdicts returned, by label"
    );
    metrics::describe_counter!(
        "hamcaller_errors_total",
        "Failed classifications, by error kind"
    );
    metrics::describe_histogram!(
        "hamcaller_detect_latency_ms",
        metrics::Unit::Milliseconds,
        "Time spent classifying one transcript"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
