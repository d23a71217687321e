//! Market data port
//!
//! Source of live indicator values.

use async_trait::async_trait;

use crate::domain::entities::{MarketIndicator, MarketSnapshot};

/// Fetches the latest value for each requested indicator
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Indicators that could not be fetched are left out of the snapshot.
    /// This never fails as a whole; partial data is the normal case.
    async fn snapshot(&self, indicators: &[MarketIndicator]) -> MarketSnapshot;
}
