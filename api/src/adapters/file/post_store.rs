//! JSON file adapter for PostRepository
//!
//! The whole collection lives in one pretty-printed JSON array. Writes replace the
//! file through a temporary sibling and a rename.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::entities::Post;
use crate::domain::ports::PostRepository;
use crate::error::DomainError;

pub struct JsonFilePostRepository {
    path: PathBuf,
}

impl JsonFilePostRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty array file if missing
    async fn ensure_store(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        if !fs::try_exists(&self.path).await? {
            fs::write(&self.path, "[]").await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for JsonFilePostRepository {
    async fn load(&self) -> Result<Vec<Post>, DomainError> {
        if let Err(e) = self.ensure_store().await {
            tracing::warn!(error = %e, path = %self.path.display(), "Post store unavailable, treating as empty");
            return Ok(Vec::new());
        }

        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Failed to read post store, treating as empty");
                return Ok(Vec::new());
            }
        };

        Ok(parse_posts(&raw, &self.path))
    }

    async fn save(&self, posts: &[Post]) -> Result<(), DomainError> {
        self.ensure_store()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let json =
            serde_json::to_string_pretty(posts).map_err(|e| DomainError::Internal(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(())
    }
}

/// Corrupt contents or anything other than an array yields an empty collection.
/// Array entries that are not objects are skipped; every other record is kept.
fn parse_posts(raw: &str, path: &Path) -> Vec<Post> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let records = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Post store is not a JSON array, treating as empty");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Post>(record) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(error = %e, index, path = %path.display(), "Skipping unreadable post record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PostCandidate;
    use chrono::Utc;
    use tempfile::TempDir;

    fn post(title: &str) -> Post {
        Post::from_candidate(
            &PostCandidate {
                title: Some(title.to_string()),
                ..Default::default()
            },
            crate::domain::entities::slugify(title),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn load_creates_missing_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("posts.json");
        let repo = JsonFilePostRepository::new(&path);

        let posts = repo.load().await.unwrap();

        assert!(posts.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFilePostRepository::new(dir.path().join("posts.json"));

        repo.save(&[post("Newest"), post("Oldest")]).await.unwrap();
        let posts = repo.load().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Newest");
        assert_eq!(posts[1].title, "Oldest");
        assert!(!repo.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "{not json").unwrap();

        let repo = JsonFilePostRepository::new(&path);
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_array_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, r#"{"posts": []}"#).unwrap();

        let repo = JsonFilePostRepository::new(&path);
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "").unwrap();

        let repo = JsonFilePostRepository::new(&path);
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loosely_typed_records_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "p1", "slug": "old-post", "title": "Old", "tags": [1, "geo"], "publishedAt": null},
                {"slug": "bare"},
                42
            ]"#,
        )
        .unwrap();

        let repo = JsonFilePostRepository::new(&path);
        let posts = repo.load().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "old-post");
        assert_eq!(posts[0].tags.len(), 2);
        assert_eq!(posts[1].slug, "bare");
        assert_eq!(posts[1].title, "");
    }

    #[tokio::test]
    async fn upsert_over_hand_written_store_keeps_old_posts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(
            &path,
            r#"[{"id": "p1", "slug": "old-post", "title": "Old", "tags": [1, "geo"], "author": "desk"}]"#,
        )
        .unwrap();

        let repo: std::sync::Arc<dyn PostRepository> =
            std::sync::Arc::new(JsonFilePostRepository::new(&path));
        let service = crate::app::PostService::new(repo);
        let outcome = service
            .upsert(PostCandidate {
                title: Some("New".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(outcome.created);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let records = raw.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["slug"], "new");
        assert_eq!(records[1]["slug"], "old-post");
        assert_eq!(records[1]["tags"], serde_json::json!([1, "geo"]));
        assert_eq!(records[1]["author"], "desk");
    }

    #[tokio::test]
    async fn saved_file_is_camel_case_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        let repo = JsonFilePostRepository::new(&path);

        repo.save(&[post("Big News")]).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.is_array());
        assert_eq!(raw[0]["slug"], "big-news");
        assert!(raw[0].get("publishedAt").is_some());
    }
}
