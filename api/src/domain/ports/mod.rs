//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod market;
pub mod notifier;
pub mod repositories;

pub use market::MarketDataSource;
#[cfg(test)]
pub use notifier::MockPartnershipNotifier;
pub use notifier::PartnershipNotifier;
pub use repositories::{FeedItemRepository, PostRepository, UserRepository};
