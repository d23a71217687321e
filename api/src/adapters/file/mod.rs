//! File-backed adapters
//!
//! JSON documents on local disk: the post collection and the feed item seed.

pub mod feed_items;
pub mod post_store;

pub use feed_items::StaticFeedItemRepository;
pub use post_store::JsonFilePostRepository;
