use axum::http::StatusCode;

pub async fn version_handler() -> (StatusCode, String) {
    (StatusCode::OK, env!("CARGO_PKG_VERSION").to_string())
}
