//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::mocks::{
    InMemoryPostRepository, InMemoryUserRepository, RecordingNotifier, StaticMarketDataSource,
};
use crate::adapters::StaticFeedItemRepository;
use crate::app::{AuthService, FeedService, MarketService, PartnershipService, PostService};
use crate::config::Config;
use crate::domain::entities::{FeedItem, PostCandidate};
use crate::domain::ports::{
    FeedItemRepository, MarketDataSource, PartnershipNotifier, PostRepository, UserRepository,
};
use crate::{build_router, AppState};

/// Secret used to sign tokens in tests
pub const TEST_SECRET: &str = "test-secret";

/// Fixed "now" that feed item ages are measured from
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 4, 12, 0, 0).unwrap()
}

/// Create a feed item titled `Story {id}`, published `hours_ago` before [`base_time`]
pub fn feed_item(id: i64, category: &str, subcategory: &str, hours_ago: i64) -> FeedItem {
    FeedItem {
        id,
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        title: format!("Story {}", id),
        excerpt: format!("Excerpt for story {}", id),
        author: "News Desk".to_string(),
        published_at: base_time() - Duration::hours(hours_ago),
        image_url: format!("https://images.example.com/{}.jpg", id),
        urgent: false,
    }
}

/// A small mixed feed: several ECON items out of date order plus other categories
pub fn sample_feed() -> Vec<FeedItem> {
    let mut urgent = feed_item(6, "CONFLITOS", "middle-east", 1);
    urgent.urgent = true;

    vec![
        feed_item(1, "ECON", "markets", 5),
        feed_item(2, "GEO", "diplomacy", 2),
        feed_item(3, "ECON", "trade", 1),
        feed_item(4, "ECON", "markets", 9),
        feed_item(5, "GEO", "europe", 3),
        urgent,
        feed_item(7, "ECON", "war-impacts", 0),
    ]
}

/// Create a post candidate with only a title
pub fn candidate(title: &str) -> PostCandidate {
    PostCandidate {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

/// Create a post candidate with a title and source URL
pub fn candidate_with_source(title: &str, source_url: &str) -> PostCandidate {
    PostCandidate {
        source_url: Some(source_url.to_string()),
        ..candidate(title)
    }
}

/// Configuration for in-process servers: no rate limiting, throwaway paths
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: 3600,
        posts_file: PathBuf::from("unused/posts.json"),
        feed_items_file: PathBuf::from("unused/feed_items.json"),
        market_refresh_secs: 60,
        market_timeout_secs: 1,
        partnership_webhook_url: None,
        rate_limit: false,
        port: 0,
    }
}

/// Handles to the in-memory ports behind a test server
pub struct TestPorts {
    pub users: Arc<InMemoryUserRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub markets: Arc<StaticMarketDataSource>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Build application state over in-memory ports
pub fn test_state(feed: Vec<FeedItem>) -> (AppState, TestPorts) {
    let config = test_config();
    let ports = TestPorts {
        users: Arc::new(InMemoryUserRepository::new()),
        posts: Arc::new(InMemoryPostRepository::new()),
        markets: Arc::new(StaticMarketDataSource::new()),
        notifier: Arc::new(RecordingNotifier::new()),
    };

    let users: Arc<dyn UserRepository> = ports.users.clone();
    let posts: Arc<dyn PostRepository> = ports.posts.clone();
    let feed: Arc<dyn FeedItemRepository> = Arc::new(StaticFeedItemRepository::new(feed));
    let markets: Arc<dyn MarketDataSource> = ports.markets.clone();
    let notifier: Arc<dyn PartnershipNotifier> = ports.notifier.clone();

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            users,
            &config.jwt_secret,
            config.token_ttl_secs,
        )),
        post_service: Arc::new(PostService::new(posts)),
        feed_service: Arc::new(FeedService::new(feed)),
        market_service: Arc::new(MarketService::new(markets)),
        partnership_service: Arc::new(PartnershipService::new(notifier)),
        config,
    };

    (state, ports)
}

/// Start an in-process server over the full router
pub fn test_server(feed: Vec<FeedItem>) -> (TestServer, TestPorts, AppState) {
    let (state, ports) = test_state(feed);
    let server = TestServer::new(build_router(state.clone())).unwrap();
    (server, ports, state)
}
