use hamcaller_classifiers::Classifier;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state.
///
/// Everything in here is read-only after startup; handlers never take locks.
#[derive(Clone)]
pub struct AppState {
    /// Classifier handling `/detect`
    pub classifier: Arc<dyn Classifier>,

    /// Human-readable backend description for `/health`
    pub backend: Arc<str>,

    /// Prometheus handle, when a recorder was installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>, backend: impl Into<String>) -> Self {
        Self {
            classifier,
            backend: Arc::from(backend.into()),
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
