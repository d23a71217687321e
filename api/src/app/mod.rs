//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod auth_service;
pub mod feed_service;
pub mod market_service;
pub mod partnership_service;
pub mod post_service;

pub use auth_service::AuthService;
pub use feed_service::{BreakingStep, FeedPage, FeedService, Headlines, Highlight, HighlightSize};
pub use market_service::{BoardView, MarketService};
pub use partnership_service::PartnershipService;
pub use post_service::{PostService, UpsertOutcome};
