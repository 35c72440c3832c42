use crate::config::ServerConfig;
use crate::server::{routes, static_files};
use crate::state::AppState;
use crate::telemetry;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use hamcaller_classifiers::Classifier;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the Axum application
pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/detect", post(routes::detect))
        .route("/api/classify", post(routes::detect))
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::metrics))
        .fallback(static_files::serve_static)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `*` anywhere in the list allows every origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Run the server until SIGINT/SIGTERM
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let classifier = config.classifier.build()?;
    let backend = format!("Ollama ({})", classifier.runtime_name());
    info!(
        model = classifier.model(),
        backend = %backend,
        "Classifier ready"
    );

    let classifier: Arc<dyn Classifier> = Arc::new(classifier);
    let mut state = AppState::new(classifier, backend);
    if config.metrics_enabled {
        state = state.with_metrics(telemetry::init_metrics()?);
    }

    let app = build_app(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("HamCaller listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, stopping server...");
}
