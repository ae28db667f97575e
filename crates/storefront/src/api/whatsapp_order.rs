use {
    crate::{
        api::{AppState, error},
        orderbook::{WhatsAppOrder, WhatsAppOrderError},
    },
    axum::{
        Json,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    serde::Serialize,
    std::sync::Arc,
    url::Url,
};

#[derive(Debug, Serialize)]
pub struct WhatsAppLink {
    pub url: Url,
}

pub async fn whatsapp_order_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WhatsAppOrder>,
) -> Response {
    match state.orderbook.whatsapp_link(&request) {
        Ok(url) => Json(WhatsAppLink { url }).into_response(),
        Err(err @ WhatsAppOrderError::MissingNameOrGovernorate)
        | Err(err @ WhatsAppOrderError::UnknownGovernorate) => {
            (StatusCode::BAD_REQUEST, error("InvalidOrder", err.to_string())).into_response()
        }
        Err(WhatsAppOrderError::ProductUnavailable) => (
            StatusCode::SERVICE_UNAVAILABLE,
            error("ProductUnavailable", "المنتج غير متاح حالياً"),
        )
            .into_response(),
        Err(WhatsAppOrderError::Other(err)) => {
            tracing::error!(?err, "WhatsAppOrderError");
            crate::api::internal_error_reply()
        }
    }
}
