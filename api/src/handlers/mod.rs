//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod auth;
pub mod feed;
pub mod markets;
pub mod partnership;
pub mod posts;

pub use auth::{login, me, register};
pub use feed::{get_breaking, get_feed, get_headlines};
pub use markets::{get_indicator, get_market_board, get_markets};
pub use partnership::send_partnership;
pub use posts::{create_post, get_post, list_posts};
