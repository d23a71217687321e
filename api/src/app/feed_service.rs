//! Feed service
//!
//! Filters, sorts and paginates the home feed, and derives the breaking-news
//! rotation and the headline ticker from the same items.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{BreakingCarousel, BreakingSlot, FeedFilters, FeedItem};
use crate::domain::ports::FeedItemRepository;
use crate::error::AppError;

/// Items shown in the hero layout on page one
pub const HIGHLIGHT_COUNT: usize = 4;

/// Regular cards per page
pub const PAGE_SIZE: usize = 6;

/// Titles shown in the headline ticker
pub const HEADLINE_COUNT: usize = 3;

pub const HEADLINE_SEPARATOR: &str = "   |   ";

pub const HEADLINE_PLACEHOLDER: &str = "Loading news...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightSize {
    Large,
    Small,
}

#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub size: HighlightSize,
    #[serde(flatten)]
    pub item: FeedItem,
}

/// One page of the filtered feed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub page: usize,
    pub total_pages: usize,
    /// Items matching the filters, across all pages
    pub total_items: usize,
    /// Empty on every page but the first
    pub highlights: Vec<Highlight>,
    pub items: Vec<FeedItem>,
}

impl FeedPage {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Split sorted items into highlights and the requested page of cards.
    /// The page is clamped to `[1, total_pages]`.
    pub fn paginate(items: Vec<FeedItem>, requested: Option<usize>) -> Self {
        let total_items = items.len();
        let rest = total_items.saturating_sub(HIGHLIGHT_COUNT);
        let total_pages = rest.div_ceil(PAGE_SIZE).max(1);
        let page = requested.unwrap_or(1).clamp(1, total_pages);

        let highlights = if page == 1 {
            items
                .iter()
                .take(HIGHLIGHT_COUNT)
                .enumerate()
                .map(|(i, item)| Highlight {
                    size: if i == 0 {
                        HighlightSize::Large
                    } else {
                        HighlightSize::Small
                    },
                    item: item.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let start = HIGHLIGHT_COUNT + (page - 1) * PAGE_SIZE;
        let page_items = items.into_iter().skip(start).take(PAGE_SIZE).collect();

        Self {
            page,
            total_pages,
            total_items,
            highlights,
            items: page_items,
        }
    }
}

/// Manual navigation in the breaking-news strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakingStep {
    Next,
    Prev,
}

/// Most recent titles for the scrolling ticker
#[derive(Debug, Clone, Serialize)]
pub struct Headlines {
    pub titles: Vec<String>,
    pub text: String,
}

impl Headlines {
    pub fn new(titles: Vec<String>) -> Self {
        let text = if titles.is_empty() {
            HEADLINE_PLACEHOLDER.to_string()
        } else {
            titles.join(HEADLINE_SEPARATOR)
        };
        Self { titles, text }
    }
}

/// Service for the news feed
pub struct FeedService<FR>
where
    FR: FeedItemRepository + ?Sized,
{
    items: Arc<FR>,
}

impl<FR> FeedService<FR>
where
    FR: FeedItemRepository + ?Sized,
{
    pub fn new(items: Arc<FR>) -> Self {
        Self { items }
    }

    async fn newest_first(&self) -> Result<Vec<FeedItem>, AppError> {
        let mut items = self.items.all().await?;
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(items)
    }

    /// Filtered, newest-first page of the feed
    pub async fn page(
        &self,
        filters: &FeedFilters,
        page: Option<usize>,
    ) -> Result<FeedPage, AppError> {
        let matching: Vec<FeedItem> = self
            .newest_first()
            .await?
            .into_iter()
            .filter(|item| filters.matches(item))
            .collect();

        Ok(FeedPage::paginate(matching, page))
    }

    /// The breaking-news slot at `position`, optionally stepped once
    pub async fn breaking(
        &self,
        position: Option<usize>,
        step: Option<BreakingStep>,
    ) -> Result<BreakingSlot, AppError> {
        let items = self.items.all().await?;
        let mut carousel = BreakingCarousel::from_items(&items);

        carousel.seek(position.unwrap_or(0));
        match step {
            Some(BreakingStep::Next) => {
                carousel.advance();
            }
            Some(BreakingStep::Prev) => {
                carousel.retreat();
            }
            None => {}
        }

        Ok(carousel.slot())
    }

    /// Latest titles regardless of any filter
    pub async fn headlines(&self) -> Result<Headlines, AppError> {
        let titles = self
            .newest_first()
            .await?
            .into_iter()
            .map(|item| item.title)
            .filter(|title| !title.is_empty())
            .take(HEADLINE_COUNT)
            .collect();

        Ok(Headlines::new(titles))
    }
}
