use {
    crate::{
        api::{AppState, error},
        orderbook::StatusUpdateError,
    },
    axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    model::order::{OrderId, OrderStatus},
    serde::Deserialize,
    std::sync::Arc,
};

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

pub async fn update_order_status_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    Json(update): Json<StatusUpdate>,
) -> Response {
    match state.orderbook.update_status(id, update.status).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(StatusUpdateError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            error("OrderNotFound", format!("no order with id {id}")),
        )
            .into_response(),
        Err(StatusUpdateError::Other(err)) => {
            tracing::error!(?err, id, "StatusUpdateError");
            crate::api::internal_error_reply()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_takes_arabic_status_labels() {
        let update: StatusUpdate = serde_json::from_str(r#"{"status": "تم التوصيل"}"#).unwrap();
        assert_eq!(update.status, OrderStatus::Delivered);
    }

    #[test]
    fn unknown_label_fails_deserialization() {
        assert!(serde_json::from_str::<StatusUpdate>(r#"{"status": "done"}"#).is_err());
    }
}
