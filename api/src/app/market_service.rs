//! Market service
//!
//! Keeps the market board current by polling the data source on a fixed period.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::entities::{
    default_indicators, IndicatorDetail, MarketBoard, MarketIndicator, MarketSnapshot, TickerEntry,
};
use crate::domain::ports::MarketDataSource;

/// Ticker rows plus the time of the last poll
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub updated_at: Option<DateTime<Utc>>,
    pub entries: Vec<TickerEntry>,
}

/// Service for market indicators
pub struct MarketService<MS>
where
    MS: MarketDataSource + ?Sized,
{
    source: Arc<MS>,
    board: RwLock<MarketBoard>,
}

impl<MS> MarketService<MS>
where
    MS: MarketDataSource + ?Sized,
{
    pub fn new(source: Arc<MS>) -> Self {
        Self::with_indicators(source, default_indicators())
    }

    pub fn with_indicators(source: Arc<MS>, indicators: Vec<MarketIndicator>) -> Self {
        Self {
            source,
            board: RwLock::new(MarketBoard::new(indicators)),
        }
    }

    /// Fetch current values straight from the source, bypassing the board
    pub async fn live_snapshot(&self) -> MarketSnapshot {
        let indicators = self.board.read().await.indicators().to_vec();
        self.source.snapshot(&indicators).await
    }

    /// Poll once and fold the result into the board
    pub async fn refresh(&self) {
        let snapshot = self.live_snapshot().await;
        let available = snapshot.len();

        let mut board = self.board.write().await;
        board.apply(Some(&snapshot), Utc::now());

        tracing::debug!(
            available,
            total = board.indicators().len(),
            "Market board refreshed"
        );
    }

    pub async fn board(&self) -> BoardView {
        let board = self.board.read().await;
        BoardView {
            updated_at: board.updated_at(),
            entries: board.entries(),
        }
    }

    pub async fn detail(&self, id: &str) -> Option<IndicatorDetail> {
        self.board.read().await.detail(id)
    }
}

impl<MS> MarketService<MS>
where
    MS: MarketDataSource + ?Sized + 'static,
{
    /// Refresh immediately, then every `period`
    pub fn spawn_refresh_loop(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tracing::info!(period_secs = period.as_secs(), "Starting market refresh loop");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                self.refresh().await;
            }
        })
    }
}
