//! Feed handlers
//!
//! The filtered home feed, the breaking-news strip and the headline ticker.
//! Supports content negotiation: Accept: application/json for JSON, otherwise HTML.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::app::BreakingStep;
use crate::domain::entities::FeedFilters;
use crate::error::AppError;
use crate::feed::{render_breaking, render_feed_page, render_headlines};
use crate::AppState;

/// Check if the client wants JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// Query for GET /feed. A request without `page` is page one, so changing a
/// filter on the client naturally resets pagination.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

impl FeedQuery {
    fn filters(&self) -> FeedFilters {
        FeedFilters {
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            search: self.search.clone(),
        }
    }
}

/// GET /feed
pub async fn get_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let page = state
        .feed_service
        .page(&query.filters(), query.page)
        .await?;

    if wants_json(&headers) {
        Ok(Json(page).into_response())
    } else {
        Ok(Html(render_feed_page(&page, Utc::now())).into_response())
    }
}

#[derive(Debug, Deserialize)]
pub struct BreakingQuery {
    pub position: Option<usize>,
    pub step: Option<BreakingStep>,
}

/// GET /feed/breaking
///
/// The slot at `position`, moved once when `step=next|prev` is given.
pub async fn get_breaking(
    State(state): State<AppState>,
    Query(query): Query<BreakingQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let slot = state
        .feed_service
        .breaking(query.position, query.step)
        .await?;

    if wants_json(&headers) {
        Ok(Json(slot).into_response())
    } else {
        Ok(Html(render_breaking(&slot)).into_response())
    }
}

/// GET /feed/headlines
pub async fn get_headlines(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let headlines = state.feed_service.headlines().await?;

    if wants_json(&headers) {
        Ok(Json(headlines).into_response())
    } else {
        Ok(Html(render_headlines(&headlines)).into_response())
    }
}
