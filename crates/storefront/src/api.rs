use {
    crate::{orderbook::Orderbook, product_cache::ProductCache},
    axum::{
        Router,
        extract::DefaultBodyLimit,
        http::{Request, StatusCode},
        middleware::{self, Next},
        response::{IntoResponse, Json, Response},
    },
    serde::{Deserialize, Serialize},
    std::{
        borrow::Cow,
        sync::Arc,
        time::Instant,
    },
    tower_http::{cors::CorsLayer, trace::TraceLayer},
};

mod create_order;
mod export_orders;
mod get_orders;
mod get_product;
mod update_order_status;
mod version;
mod whatsapp_order;

/// Centralized application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    pub orderbook: Arc<Orderbook>,
    pub products: Arc<ProductCache>,
}

/// Middleware that tracks request metrics using Axum's MatchedPath
async fn with_matched_path_metric(req: Request<axum::body::Body>, next: Next) -> Response {
    let metrics = ApiMetrics::instance(observe::metrics::get_storage_registry()).unwrap();

    let method = req.method().as_str();
    let matched_path = req
        .extensions()
        .get::<axum::extract::MatchedPath>()
        .map(|path| path.as_str())
        .unwrap_or("unknown");
    let label = format!("{method} {matched_path}");

    let timer = Instant::now();
    let response = next.run(req).await;
    let status = response.status();

    metrics.on_request_completed(&label, status, timer);
    if status.is_client_error() || status.is_server_error() {
        metrics
            .requests_rejected
            .with_label_values(&[status.as_str()])
            .inc();
    }

    response
}

const MAX_JSON_BODY_PAYLOAD: u64 = 1024 * 16;

pub fn handle_all_routes(orderbook: Arc<Orderbook>, products: Arc<ProductCache>) -> Router {
    let state = Arc::new(AppState {
        orderbook,
        products,
    });

    let metrics = ApiMetrics::instance(observe::metrics::get_storage_registry()).unwrap();
    metrics.reset_requests_rejected();

    let api_router = Router::new()
        .route(
            "/v1/orders",
            axum::routing::get(get_orders::get_orders_handler)
                .merge(axum::routing::post(create_order::create_order_handler)),
        )
        // Specific before parameterized.
        .route(
            "/v1/orders/export",
            axum::routing::get(export_orders::export_orders_handler),
        )
        .route(
            "/v1/orders/whatsapp",
            axum::routing::post(whatsapp_order::whatsapp_order_handler),
        )
        .route(
            "/v1/orders/{id}/status",
            axum::routing::put(update_order_status::update_order_status_handler),
        )
        .route(
            "/v1/product",
            axum::routing::get(get_product::get_product_handler),
        )
        .route("/v1/version", axum::routing::get(version::version_handler))
        .with_state(state)
        .layer(middleware::from_fn(with_matched_path_metric));

    finalize_router(api_router)
}

#[derive(prometheus_metric_storage::MetricStorage, Clone, Debug)]
#[metric(subsystem = "api")]
struct ApiMetrics {
    /// Number of completed API requests.
    #[metric(labels("method", "status_code"))]
    requests_complete: prometheus::IntCounterVec,

    /// Number of rejected API requests.
    #[metric(labels("status_code"))]
    requests_rejected: prometheus::IntCounterVec,

    /// Execution time for each API request.
    #[metric(labels("method"), buckets(0.1, 0.5, 1, 2, 4, 6, 8, 10))]
    requests_duration_seconds: prometheus::HistogramVec,
}

impl ApiMetrics {
    const INITIAL_STATUSES: &'static [StatusCode] = &[
        StatusCode::OK,
        StatusCode::CREATED,
        StatusCode::BAD_REQUEST,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::SERVICE_UNAVAILABLE,
    ];

    fn reset_requests_rejected(&self) {
        for status in Self::INITIAL_STATUSES {
            self.requests_rejected
                .with_label_values(&[status.as_str()])
                .reset();
        }
    }

    fn on_request_completed(&self, method: &str, status: StatusCode, timer: Instant) {
        self.requests_complete
            .with_label_values(&[method, status.as_str()])
            .inc();
        self.requests_duration_seconds
            .with_label_values(&[method])
            .observe(timer.elapsed().as_secs_f64());
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    pub error_type: Cow<'static, str>,
    /// Human readable description, in Arabic where the storefront shows it
    /// to customers.
    pub description: Cow<'static, str>,
    /// Additional arbitrary data that can be attached to an API error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

pub fn error(error_type: &'static str, description: impl AsRef<str>) -> Json<Error> {
    Json(Error {
        error_type: error_type.into(),
        description: Cow::Owned(description.as_ref().to_owned()),
        data: None,
    })
}

pub fn rich_error(
    error_type: &'static str,
    description: impl AsRef<str>,
    data: impl Serialize,
) -> Json<Error> {
    let data = match serde_json::to_value(&data) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(?err, "failed to serialize error data");
            None
        }
    };

    Json(Error {
        error_type: error_type.into(),
        description: Cow::Owned(description.as_ref().to_owned()),
        data,
    })
}

pub fn internal_error_reply() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error("InternalServerError", ""),
    )
        .into_response()
}

/// 503 while the initial order load has not completed yet.
pub fn orders_loading_reply() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        error("OrdersNotLoaded", "order list is still loading, retry shortly"),
    )
        .into_response()
}

/// Sets up basic metrics, cors and log tracing for all routes. Takes a
/// router with versioned routes and nests it under /api, then applies
/// middleware.
fn finalize_router(api_router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(vec![
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
            axum::http::Method::PUT,
            axum::http::Method::HEAD,
        ])
        .allow_headers(vec![
            axum::http::header::ORIGIN,
            axum::http::header::CONTENT_TYPE,
        ]);

    Router::new()
        .nest("/api", api_router)
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_PAYLOAD as usize))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub async fn response_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            database::{orders::MockOrderStoring, products::MockProductStoring},
            orders_cache::OrdersCache,
        },
        axum::{body::Body, http::Request},
        serde_json::json,
        std::time::Duration,
        tower::ServiceExt as _,
    };

    /// A fully wired router over mock storage. The orders cache starts
    /// empty and unloaded.
    fn test_router() -> Router {
        let database = Arc::new(MockOrderStoring::new());
        let mut products = MockProductStoring::new();
        products.expect_current_product().returning(|| Ok(None));
        let orders_cache = OrdersCache::new(database.clone(), Duration::from_secs(3600));
        let products = ProductCache::new(Arc::new(products), Duration::from_secs(3600));
        let orderbook = Arc::new(Orderbook::new(
            database,
            orders_cache,
            products.clone(),
            "201556133633".to_string(),
        ));
        handle_all_routes(orderbook, products)
    }

    #[tokio::test]
    async fn routes_are_nested_under_api() {
        let response = test_router()
            .oneshot(
                Request::get("/api/v1/version")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn listing_before_initial_load_is_service_unavailable() {
        let response = test_router()
            .oneshot(Request::get("/api/v1/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value =
            serde_json::from_slice(&response_body(response).await).unwrap();
        assert_eq!(body["errorType"], "OrdersNotLoaded");
    }

    #[tokio::test]
    async fn malformed_order_submission_is_bad_request() {
        let response = test_router()
            .oneshot(
                Request::post("/api/v1/orders")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let response = test_router()
            .oneshot(Request::get("/api/v1/product").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rich_errors_skip_unset_data_field() {
        assert_eq!(
            serde_json::to_value(&Error {
                error_type: "foo".into(),
                description: "bar".into(),
                data: None,
            })
            .unwrap(),
            json!({"errorType": "foo", "description": "bar"}),
        );
    }

    #[test]
    fn rich_errors_attach_data() {
        let Json(error) = rich_error("foo", "bar", json!({"field": "phone"}));
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "errorType": "foo",
                "description": "bar",
                "data": {"field": "phone"},
            }),
        );
    }
}
