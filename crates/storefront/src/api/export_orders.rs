use {
    super::get_orders::OrderQuery,
    crate::{
        api::{AppState, error, orders_loading_reply},
        export,
    },
    axum::{
        extract::{Query, State},
        http::{StatusCode, header},
        response::{IntoResponse, Response},
    },
    percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode},
    std::sync::Arc,
};

pub async fn export_orders_handler(
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
    let csv = match state.orderbook.export_csv(&filter) {
        Ok(csv) => csv,
        Err(_) => return orders_loading_reply(),
    };

    let filename = export::filename(chrono::Utc::now());
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        csv,
    )
        .into_response()
}

/// Header values must be ASCII, so the Arabic filename goes into the RFC
/// 5987 `filename*` parameter with a plain ASCII fallback next to it.
fn content_disposition(filename: &str) -> String {
    format!(
        "attachment; filename=\"orders.csv\"; filename*=UTF-8''{}",
        utf8_percent_encode(filename, NON_ALPHANUMERIC),
    )
}
