//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use crate::domain::entities::user::DEFAULT_ROLE;
use crate::domain::entities::{
    MarketIndicator, MarketSnapshot, NewUser, PartnershipRequest, Post, User, UserId,
};
use crate::domain::ports::{MarketDataSource, PartnershipNotifier, PostRepository, UserRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn count(&self) -> usize {
        self.users.read().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();

        // Mirrors the UNIQUE constraint on users.email
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::AlreadyExists(format!(
                "User with email '{}' already exists",
                new_user.email
            )));
        }

        let user = User {
            id: UserId(users.len() as i32 + 1),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            name: new_user.name.clone(),
            role: DEFAULT_ROLE.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

// ============================================================================
// In-Memory Post Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the stored collection
    pub fn snapshot(&self) -> Vec<Post> {
        self.posts.read().unwrap().clone()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn load(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.snapshot())
    }

    async fn save(&self, posts: &[Post]) -> Result<(), DomainError> {
        *self.posts.write().unwrap() = posts.to_vec();
        Ok(())
    }
}

// ============================================================================
// Static Market Data Source
// ============================================================================

/// Serves whatever values the test has set, for requested indicators only
#[derive(Default)]
pub struct StaticMarketDataSource {
    values: Mutex<HashMap<String, serde_json::Value>>,
    calls: AtomicUsize,
}

impl StaticMarketDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, id: &str, value: serde_json::Value) {
        self.values.lock().unwrap().insert(id.to_string(), value);
    }

    pub fn remove(&self, id: &str) {
        self.values.lock().unwrap().remove(id);
    }

    /// Number of snapshot requests served
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for StaticMarketDataSource {
    async fn snapshot(&self, indicators: &[MarketIndicator]) -> MarketSnapshot {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let values = self.values.lock().unwrap();

        indicators
            .iter()
            .filter_map(|indicator| {
                values
                    .get(indicator.id)
                    .map(|value| (indicator.id.to_string(), value.clone()))
            })
            .collect()
    }
}

// ============================================================================
// Recording Partnership Notifier
// ============================================================================

/// Keeps every delivered request for later inspection
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<PartnershipRequest>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<PartnershipRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PartnershipNotifier for RecordingNotifier {
    async fn notify(&self, request: &PartnershipRequest) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }
}
