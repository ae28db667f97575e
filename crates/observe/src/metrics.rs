use {
    axum::{Router, http::StatusCode, routing::get},
    prometheus::Encoder,
    std::{collections::HashMap, net::SocketAddr, sync::Arc, sync::OnceLock},
    tokio::task::{self, JoinHandle},
};

/// Global metrics registry used by all components.
static REGISTRY: OnceLock<prometheus_metric_storage::StorageRegistry> = OnceLock::new();

/// Configure the global metrics registry with an optional common prefix
/// and common labels.
///
/// Must be called at most once, before any call to [`get_registry`],
/// ideally at the very beginning of `main`.
///
/// # Panics
///
/// Panics if called twice or after [`get_registry`], or if the registry
/// configuration is invalid.
pub fn setup_registry(prefix: Option<String>, labels: Option<HashMap<String, String>>) {
    let registry = prometheus::Registry::new_custom(prefix, labels).unwrap();
    let storage_registry = prometheus_metric_storage::StorageRegistry::new(registry);
    REGISTRY.set(storage_registry).unwrap();
}

/// Like [`setup_registry`], but can be called multiple times in a row.
/// Later calls are ignored.
///
/// Useful for tests.
pub fn setup_registry_reentrant(prefix: Option<String>, labels: Option<HashMap<String, String>>) {
    let registry = prometheus::Registry::new_custom(prefix, labels).unwrap();
    let storage_registry = prometheus_metric_storage::StorageRegistry::new(registry);
    REGISTRY.set(storage_registry).ok();
}

pub fn get_registry() -> &'static prometheus::Registry {
    get_storage_registry().registry()
}

/// Get the global instance of the metric storage registry.
///
/// If the registry was not configured with [`setup_registry`] it is
/// initialized with a default value. Panicking instead would make unit
/// tests miserable since there is no hook to run [`setup_registry`] before
/// each test.
pub fn get_storage_registry() -> &'static prometheus_metric_storage::StorageRegistry {
    REGISTRY.get_or_init(prometheus_metric_storage::StorageRegistry::default)
}

pub fn encode(registry: &prometheus::Registry) -> String {
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

pub const DEFAULT_METRICS_PORT: u16 = 9586;

#[async_trait::async_trait]
pub trait LivenessChecking: Send + Sync {
    async fn is_alive(&self) -> bool;
}

/// Serves `/metrics` and `/liveness` on the given address in a background
/// task.
pub fn serve_metrics(liveness: Arc<dyn LivenessChecking>, address: SocketAddr) -> JoinHandle<()> {
    let app = Router::new()
        .route(
            "/metrics",
            get(|| async { encode(get_registry()) }),
        )
        .route(
            "/liveness",
            get(move || {
                let liveness = liveness.clone();
                async move {
                    match liveness.is_alive().await {
                        true => StatusCode::OK,
                        false => StatusCode::SERVICE_UNAVAILABLE,
                    }
                }
            }),
        );
    tracing::info!(%address, "serving metrics");
    task::spawn(async move {
        let listener = tokio::net::TcpListener::bind(address)
            .await
            .expect("failed to bind metrics server");
        axum::serve(listener, app)
            .await
            .expect("metrics server died");
    })
}
