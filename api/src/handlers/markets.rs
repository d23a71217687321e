//! Market handlers
//!
//! Live quotes, the polled ticker board and per-indicator explanations.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::domain::entities::{IndicatorDetail, MarketSnapshot};
use crate::error::AppError;
use crate::feed::render_market_board;
use crate::AppState;

/// Check if the client asked for an HTML fragment
fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false)
}

/// GET /api/markets
///
/// Fetches every indicator from upstream on each call. Indicators that could not
/// be fetched are absent from the object.
pub async fn get_markets(State(state): State<AppState>) -> Json<MarketSnapshot> {
    Json(state.market_service.live_snapshot().await)
}

/// GET /api/markets/board
pub async fn get_market_board(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let view = state.market_service.board().await;

    if wants_html(&headers) {
        Html(render_market_board(&view)).into_response()
    } else {
        Json(view).into_response()
    }
}

/// GET /api/markets/:id
pub async fn get_indicator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IndicatorDetail>, AppError> {
    state
        .market_service
        .detail(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Indicator '{}' not found", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn wants_html_reads_accept() {
        let mut headers = HeaderMap::new();
        assert!(!wants_html(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        assert!(wants_html(&headers));
    }
}
