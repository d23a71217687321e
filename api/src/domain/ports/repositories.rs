//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (PostgreSQL, JSON files).

use async_trait::async_trait;

use crate::domain::entities::{FeedItem, NewUser, Post, User};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user. Fails with `AlreadyExists` when the email is taken.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Whole-collection store for posts, newest first
///
/// There is no per-record API: callers read the full collection, modify it and
/// write it back.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Load every post. Unreadable storage yields an empty collection.
    async fn load(&self) -> Result<Vec<Post>, DomainError>;

    /// Replace the stored collection
    async fn save(&self, posts: &[Post]) -> Result<(), DomainError>;
}

/// Read-only source of feed items
#[async_trait]
pub trait FeedItemRepository: Send + Sync {
    /// Every feed item, in storage order
    async fn all(&self) -> Result<Vec<FeedItem>, DomainError>;
}
