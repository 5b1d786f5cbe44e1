use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if METRICS_HANDLE.set(handle).is_err() {
                tracing::warn!("Metrics handle already initialized");
            }
        }
        Err(e) => tracing::error!("Failed to install Prometheus recorder: {}", e),
    }
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Counts push send attempts by outcome (`sent` / `failed`).
pub fn record_push(outcome: &'static str) {
    metrics::counter!("push_notifications_total", "outcome" => outcome).increment(1);
}

/// Counts rows created per table, for growth dashboards.
pub fn record_created(table: &'static str) {
    metrics::counter!("store_rows_created_total", "table" => table).increment(1);
}
