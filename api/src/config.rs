use std::env;
use std::path::PathBuf;

/// Signing secret used when `JWT_SECRET` is not set. Tokens signed with it are forgeable.
pub const INSECURE_DEFAULT_SECRET: &str = "dev-secret-not-for-production";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// HMAC secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds (7 days by default)
    pub token_ttl_secs: i64,
    /// JSON array of posts
    pub posts_file: PathBuf,
    /// JSON array of feed items, loaded once at startup
    pub feed_items_file: PathBuf,
    pub market_refresh_secs: u64,
    /// Bound on each outbound quote request
    pub market_timeout_secs: u64,
    /// Where partnership messages are forwarded; logged only when unset
    pub partnership_webhook_url: Option<String>,
    /// Apply per-IP rate limiting to the credential and contact routes
    pub rate_limit: bool,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| INSECURE_DEFAULT_SECRET.to_string()),
            token_ttl_secs: parse_var("TOKEN_TTL_SECS", 7 * 24 * 60 * 60),
            posts_file: env::var("POSTS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/posts.json")),
            feed_items_file: env::var("FEED_ITEMS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/feed_items.json")),
            market_refresh_secs: parse_var("MARKET_REFRESH_SECS", 60),
            market_timeout_secs: parse_var("MARKET_TIMEOUT_SECS", 9),
            partnership_webhook_url: env::var("PARTNERSHIP_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            rate_limit: env::var("RATE_LIMIT")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "off"))
                .unwrap_or(true),
            port: parse_var("PORT", 8080),
        }
    }

    /// Check if the token secret is the built-in development value
    pub fn uses_insecure_secret(&self) -> bool {
        self.jwt_secret == INSECURE_DEFAULT_SECRET
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
