//! Post service
//!
//! Upsert, listing and lookup over the whole-collection post store.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::entities::{slugify, unique_slug, Post, PostCandidate, PostSummary};
use crate::domain::ports::PostRepository;
use crate::error::AppError;

/// Listing size when the caller gives none
pub const DEFAULT_LIST_LIMIT: usize = 30;

/// Result of an upsert
#[derive(Debug, Clone, Serialize)]
pub struct UpsertOutcome {
    pub post: Post,
    /// `false` when an existing post with the same source URL was returned
    pub created: bool,
}

/// Service for blog posts
pub struct PostService<PR>
where
    PR: PostRepository + ?Sized,
{
    posts: Arc<PR>,
    /// Serializes load-modify-save cycles within this process
    write_lock: Mutex<()>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository + ?Sized,
{
    pub fn new(posts: Arc<PR>) -> Self {
        Self {
            posts,
            write_lock: Mutex::new(()),
        }
    }

    /// Insert a post unless one with the same source URL already exists
    pub async fn upsert(&self, candidate: PostCandidate) -> Result<UpsertOutcome, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut posts = self.posts.load().await?;

        if let Some(source_url) = candidate.normalized_source_url() {
            if let Some(existing) = posts.iter().find(|p| p.source_url == source_url) {
                tracing::debug!(slug = %existing.slug, source_url = %source_url, "Post already stored");
                return Ok(UpsertOutcome {
                    post: existing.clone(),
                    created: false,
                });
            }
        }

        let slug = {
            let taken: HashSet<&str> = posts
                .iter()
                .map(|p| p.slug.as_str())
                .filter(|s| !s.is_empty())
                .collect();
            unique_slug(&slugify(candidate.slug_source()), &taken)
        };

        let post = Post::from_candidate(&candidate, slug, Utc::now());
        posts.insert(0, post.clone());
        self.posts.save(&posts).await?;

        tracing::info!(slug = %post.slug, id = %post.id, "Post stored");

        Ok(UpsertOutcome {
            post,
            created: true,
        })
    }

    /// Newest posts first, at most `limit`
    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<PostSummary>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let posts = self.posts.load().await?;

        Ok(posts.iter().take(limit).map(Post::summary).collect())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError> {
        let posts = self.posts.load().await?;
        Ok(posts.into_iter().find(|p| p.slug == slug))
    }
}
