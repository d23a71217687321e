//! Post handlers
//!
//! Listing, lookup and ingestion of blog posts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::app::UpsertOutcome;
use crate::domain::entities::{Post, PostCandidate, PostSummary};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub limit: Option<usize>,
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostSummary>>, AppError> {
    Ok(Json(state.post_service.list(query.limit).await?))
}

/// GET /api/posts/:slug
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = state
        .post_service
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", slug)))?;

    Ok(Json(post))
}

/// POST /api/posts
///
/// 201 with the new post, or 200 with the existing one when the source URL was
/// already stored.
pub async fn create_post(
    State(state): State<AppState>,
    Json(candidate): Json<PostCandidate>,
) -> Result<(StatusCode, Json<UpsertOutcome>), AppError> {
    let outcome = state.post_service.upsert(candidate).await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome)))
}
