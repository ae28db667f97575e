use {
    crate::{
        api::{AppState, error, rich_error},
        orderbook::AddOrderError,
    },
    axum::{
        Json,
        body,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    model::order::OrderCreation,
    serde_json::json,
    std::sync::Arc,
};

pub async fn create_order_handler(State(state): State<Arc<AppState>>, body: body::Bytes) -> Response {
    let order = match serde_json::from_slice::<OrderCreation>(&body) {
        Ok(order) => order,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, error("InvalidJson", err.to_string()))
                .into_response();
        }
    };

    match state.orderbook.add_order(order.clone()).await {
        Ok(order) => {
            tracing::debug!(id = order.id, "order created");
            (StatusCode::CREATED, Json(order)).into_response()
        }
        Err(err) => {
            tracing::debug!(?order, ?err, "error creating order");
            AddOrderErrorWrapper(err).into_response()
        }
    }
}

pub struct AddOrderErrorWrapper(pub AddOrderError);

impl IntoResponse for AddOrderErrorWrapper {
    fn into_response(self) -> Response {
        match self.0 {
            AddOrderError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                // The description is shown verbatim to the customer; the
                // field name lets the form highlight the offending input.
                rich_error(
                    "InvalidOrder",
                    err.to_string(),
                    json!({"field": err.field()}),
                ),
            )
                .into_response(),
            AddOrderError::ProductUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                error("ProductUnavailable", "المنتج غير متاح حالياً"),
            )
                .into_response(),
            AddOrderError::Database(err) => {
                tracing::error!(?err, "AddOrderError::Database");
                crate::api::internal_error_reply()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{api::response_body, order_validation::ValidationError},
    };

    #[tokio::test]
    async fn validation_error_names_the_field() {
        let response =
            AddOrderErrorWrapper(AddOrderError::Validation(ValidationError::InvalidPhone))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value =
            serde_json::from_slice(&response_body(response).await).unwrap();
        assert_eq!(body["errorType"], "InvalidOrder");
        assert_eq!(body["description"], "رقم الهاتف غير صحيح (يجب أن يبدأ بـ 01)");
        assert_eq!(body["data"]["field"], "phone");
    }

    #[tokio::test]
    async fn database_error_is_not_leaked() {
        let response =
            AddOrderErrorWrapper(AddOrderError::Database(anyhow::anyhow!("secret dsn")))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = String::from_utf8(response_body(response).await).unwrap();
        assert!(!body.contains("secret"));
    }
}
