use {
    crate::api::{AppState, error},
    axum::{
        Json,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    std::sync::Arc,
};

pub async fn get_product_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.products.current() {
        Some(product) => Json(product).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            error("ProductNotFound", "المنتج غير متاح حالياً"),
        )
            .into_response(),
    }
}
