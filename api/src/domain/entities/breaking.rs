//! Breaking news rotation
//!
//! A wrap-around cursor over the most recent urgent items. Clients advance it on a
//! fixed timer and restart the timer after manual navigation.

use serde::Serialize;

use super::FeedItem;

/// Maximum number of urgent items in the rotation
pub const MAX_BREAKING_ITEMS: usize = 5;

/// Seconds between automatic advances
pub const ROTATION_PERIOD_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct BreakingCarousel {
    items: Vec<FeedItem>,
    position: usize,
}

/// What a client needs to show one slot of the rotation
#[derive(Debug, Clone, Serialize)]
pub struct BreakingSlot {
    pub item: Option<FeedItem>,
    pub position: usize,
    pub previous: usize,
    pub next: usize,
    pub total: usize,
    pub rotation_period_secs: u64,
}

impl BreakingCarousel {
    /// Build the rotation from arbitrary items: urgent only, newest first, capped.
    pub fn from_items(items: &[FeedItem]) -> Self {
        let mut urgent: Vec<FeedItem> = items.iter().filter(|i| i.urgent).cloned().collect();
        urgent.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        urgent.truncate(MAX_BREAKING_ITEMS);

        Self {
            items: urgent,
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&FeedItem> {
        self.items.get(self.position)
    }

    /// Jump to an absolute position, wrapping past the end
    pub fn seek(&mut self, position: usize) -> Option<&FeedItem> {
        if !self.is_empty() {
            self.position = position % self.len();
        }
        self.current()
    }

    pub fn advance(&mut self) -> Option<&FeedItem> {
        if !self.is_empty() {
            self.position = (self.position + 1) % self.len();
        }
        self.current()
    }

    pub fn retreat(&mut self) -> Option<&FeedItem> {
        if !self.is_empty() {
            self.position = (self.position + self.len() - 1) % self.len();
        }
        self.current()
    }

    pub fn slot(&self) -> BreakingSlot {
        let total = self.len();
        let (previous, next) = if total == 0 {
            (0, 0)
        } else {
            (
                (self.position + total - 1) % total,
                (self.position + 1) % total,
            )
        };

        BreakingSlot {
            item: self.current().cloned(),
            position: self.position,
            previous,
            next,
            total,
            rotation_period_secs: ROTATION_PERIOD_SECS,
        }
    }
}
