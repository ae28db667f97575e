use {
    crate::api::{AppState, error, orders_loading_reply},
    axum::{
        Json,
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    model::order::{OrderFilter, OrderStatus},
    serde::Deserialize,
    std::sync::Arc,
};

#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub search: Option<String>,
    /// One of the status labels, or "all" (the admin dropdown default) to
    /// skip status filtering.
    pub status: Option<String>,
}

impl OrderQuery {
    pub fn into_filter(self) -> Result<OrderFilter, String> {
        let status = match self.status.as_deref() {
            None | Some("all") => None,
            Some(label) => Some(
                label
                    .parse::<OrderStatus>()
                    .map_err(|_| format!("unknown status {label:?}"))?,
            ),
        };
        Ok(OrderFilter {
            search: self.search,
            status,
        })
    }
}

pub async fn get_orders_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OrderQuery>,
) -> Response {
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(description) => {
            return (StatusCode::BAD_REQUEST, error("InvalidStatus", description))
                .into_response();
        }
    };
    match state.orderbook.orders(&filter) {
        Ok(listing) => Json(listing).into_response(),
        Err(_) => orders_loading_reply(),
    }
}
