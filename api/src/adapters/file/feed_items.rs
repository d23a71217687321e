//! Static feed item source
//!
//! Feed items are read once at startup and never change for the life of the process.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::entities::FeedItem;
use crate::domain::ports::FeedItemRepository;
use crate::error::DomainError;

pub struct StaticFeedItemRepository {
    items: Vec<FeedItem>,
}

impl StaticFeedItemRepository {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self { items }
    }

    /// Load a JSON array of feed items
    pub async fn from_json_file(path: &Path) -> Result<Self, DomainError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Storage(format!("{}: {}", path.display(), e)))?;

        let items: Vec<FeedItem> = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Validation(format!("{}: {}", path.display(), e)))?;

        Ok(Self::new(items))
    }
}

#[async_trait]
impl FeedItemRepository for StaticFeedItemRepository {
    async fn all(&self) -> Result<Vec<FeedItem>, DomainError> {
        Ok(self.items.clone())
    }
}
