//! Newsdesk API Server
//!
//! Backend for a news site: user accounts, a flat-file post store, the filtered
//! home feed and a polled market ticker.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    HttpMarketDataSource, JsonFilePostRepository, LogPartnershipNotifier, PostgresUserRepository,
    StaticFeedItemRepository, WebhookPartnershipNotifier,
};
use app::{AuthService, FeedService, MarketService, PartnershipService, PostService};
use config::Config;
use domain::ports::{
    FeedItemRepository, MarketDataSource, PartnershipNotifier, PostRepository, UserRepository,
};

/// Application state shared across all handlers
///
/// Services hold their ports as trait objects so the router can be built over
/// any adapter set.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub post_service: Arc<PostService<dyn PostRepository>>,
    pub feed_service: Arc<FeedService<dyn FeedItemRepository>>,
    pub market_service: Arc<MarketService<dyn MarketDataSource>>,
    pub partnership_service: Arc<PartnershipService<dyn PartnershipNotifier>>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full router over the given state
pub fn build_router(state: AppState) -> Router {
    // Credential and contact routes, rate limited per peer IP when enabled
    let mut public_writes = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/api/partnership-send", post(handlers::send_partnership));

    if state.config.rate_limit {
        // 2 req/sec sustained, burst of 5
        // PeerIpKeyExtractor needs the server to provide ConnectInfo<SocketAddr>
        if let Some(governor_config) = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
        {
            public_writes = public_writes.layer(GovernorLayer {
                config: Arc::new(governor_config),
            });
        } else {
            tracing::warn!("Invalid rate limit settings, rate limiting disabled");
        }
    }

    // Bearer token required
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route("/api/posts", post(handlers::create_post))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Posts (public read)
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/:slug", get(handlers::get_post))
        // Feed
        .route("/feed", get(handlers::get_feed))
        .route("/feed/breaking", get(handlers::get_breaking))
        .route("/feed/headlines", get(handlers::get_headlines))
        // Markets
        .route("/api/markets", get(handlers::get_markets))
        .route("/api/markets/board", get(handlers::get_market_board))
        .route("/api/markets/:id", get(handlers::get_indicator))
        .merge(public_writes)
        .merge(protected)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,newsdesk_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Newsdesk API...");

    // Load configuration
    let config = Config::from_env();
    if config.uses_insecure_secret() {
        tracing::warn!("JWT_SECRET is not set; using an insecure development secret");
    }

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = adapters::postgres::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    adapters::postgres::ensure_schema(&db)
        .await
        .context("Failed to create schema")?;
    tracing::info!("Database connected");

    // Create adapters
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db));
    let post_store = JsonFilePostRepository::new(config.posts_file.clone());
    tracing::info!(path = %post_store.path().display(), "Using post store");
    let post_repo: Arc<dyn PostRepository> = Arc::new(post_store);

    let feed_repo: Arc<dyn FeedItemRepository> =
        match StaticFeedItemRepository::from_json_file(&config.feed_items_file).await {
            Ok(repo) => Arc::new(repo),
            Err(e) => {
                tracing::warn!(error = %e, "Feed items unavailable, serving an empty feed");
                Arc::new(StaticFeedItemRepository::new(Vec::new()))
            }
        };

    let market_source: Arc<dyn MarketDataSource> = Arc::new(
        HttpMarketDataSource::new(Duration::from_secs(config.market_timeout_secs))
            .context("Failed to build market HTTP client")?,
    );

    let notifier: Arc<dyn PartnershipNotifier> = match &config.partnership_webhook_url {
        Some(url) => Arc::new(WebhookPartnershipNotifier::new(url.clone())),
        None => {
            tracing::info!("PARTNERSHIP_WEBHOOK_URL not set, partnership requests are only logged");
            Arc::new(LogPartnershipNotifier)
        }
    };

    // Create application services
    let auth_service = Arc::new(AuthService::new(
        user_repo,
        &config.jwt_secret,
        config.token_ttl_secs,
    ));
    let post_service = Arc::new(PostService::new(post_repo));
    let feed_service = Arc::new(FeedService::new(feed_repo));
    let market_service = Arc::new(MarketService::new(market_source));
    let partnership_service = Arc::new(PartnershipService::new(notifier));

    market_service
        .clone()
        .spawn_refresh_loop(Duration::from_secs(config.market_refresh_secs.max(1)));

    // Create app state
    let state = AppState {
        auth_service,
        post_service,
        feed_service,
        market_service,
        partnership_service,
        config: config.clone(),
    };

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
