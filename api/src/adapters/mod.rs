//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod file;
pub mod markets;
pub mod notify;
pub mod postgres;

pub use file::{JsonFilePostRepository, StaticFeedItemRepository};
pub use markets::HttpMarketDataSource;
pub use notify::{LogPartnershipNotifier, WebhookPartnershipNotifier};
pub use postgres::PostgresUserRepository;
