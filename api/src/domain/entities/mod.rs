//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod breaking;
pub mod feed_item;
pub mod market;
pub mod partnership;
pub mod post;
pub mod user;

pub use breaking::{BreakingCarousel, BreakingSlot};
pub use feed_item::{FeedFilters, FeedItem};
pub use market::{
    default_indicators, Direction, IndicatorDetail, MarketBoard, MarketIndicator, MarketSnapshot,
    TickerEntry,
};
pub use partnership::PartnershipRequest;
pub use post::{slugify, unique_slug, Post, PostCandidate, PostSummary};
pub use user::{Claims, NewUser, User, UserId};
