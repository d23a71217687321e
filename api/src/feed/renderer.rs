//! Feed renderer
//!
//! Renders feed pages, the breaking-news strip, the headline ticker and the market
//! board to HTML fragments. Every function is pure: same input, same markup.

use chrono::{DateTime, Utc};
use html_escape::{encode_quoted_attribute, encode_text};

use crate::app::feed_service::HEADLINE_SEPARATOR;
use crate::app::{BoardView, FeedPage, Headlines, Highlight, HighlightSize};
use crate::domain::entities::{BreakingSlot, Direction, FeedItem, TickerEntry};

pub const EMPTY_FEED_MESSAGE: &str = "No news found for the selected filters.";

/// Render one page of the feed: highlights (page one only), cards, pagination
pub fn render_feed_page(page: &FeedPage, now: DateTime<Utc>) -> String {
    let mut buf = String::new();

    if page.is_empty() {
        buf.push_str("<div class=\"feed-empty\">");
        buf.push_str(EMPTY_FEED_MESSAGE);
        buf.push_str("</div>\n");
        return buf;
    }

    if !page.highlights.is_empty() {
        buf.push_str("<div class=\"top-highlights\">\n");
        for highlight in &page.highlights {
            buf.push_str(&render_highlight(highlight, now));
        }
        buf.push_str("</div>\n");
    }

    buf.push_str("<div class=\"feed-list\">\n");
    for item in &page.items {
        buf.push_str(&render_card(item));
    }
    buf.push_str("</div>\n");

    if page.total_pages > 1 {
        buf.push_str("<nav class=\"pagination\">");
        for p in 1..=page.total_pages {
            let class = if p == page.page {
                "page-btn active"
            } else {
                "page-btn"
            };
            buf.push_str(&format!(
                "<button class=\"{}\" data-page=\"{}\">{}</button>",
                class, p, p
            ));
        }
        buf.push_str("</nav>\n");
    }

    buf
}

fn render_highlight(highlight: &Highlight, now: DateTime<Utc>) -> String {
    let item = &highlight.item;
    let size = match highlight.size {
        HighlightSize::Large => "large",
        HighlightSize::Small => "small",
    };

    format!(
        "<div class=\"highlight-card {}\" data-article=\"article-{}\" style=\"background-image: url('{}')\">\
<div class=\"highlight-overlay\"><div class=\"highlight-meta\">\
<span class=\"highlight-category\">{}</span><span class=\"highlight-time\">{}</span></div>\
<h3 class=\"highlight-title\">{}</h3></div></div>\n",
        size,
        item.id,
        encode_quoted_attribute(&item.image_url),
        encode_text(&item.category),
        relative_time(item.published_at, now),
        encode_text(&item.title),
    )
}

fn render_card(item: &FeedItem) -> String {
    format!(
        "<article class=\"feed-card\" id=\"article-{}\">\
<div class=\"card-image\" style=\"background-image: url('{}')\"></div>\
<div class=\"card-content\"><div class=\"card-meta\"><span class=\"card-date\">{}</span></div>\
<h2 class=\"card-title\">{}</h2><p class=\"card-excerpt\">{}</p>\
<div class=\"card-author\">By {}</div></div>\
<div class=\"card-badge\">{}</div></article>\n",
        item.id,
        encode_quoted_attribute(&item.image_url),
        card_date(item.published_at),
        encode_text(&item.title),
        encode_text(&item.excerpt),
        encode_text(&item.author),
        encode_text(&item.category),
    )
}

/// "now", "5 minutes ago", "1 hour ago", "3 days ago"
pub fn relative_time(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    let diff = (now - published).num_seconds();
    let (n, unit) = if diff < MINUTE {
        return "now".to_string();
    } else if diff < HOUR {
        (diff / MINUTE, "minute")
    } else if diff < DAY {
        (diff / HOUR, "hour")
    } else {
        (diff / DAY, "day")
    };

    let plural = if n == 1 { "" } else { "s" };
    format!("{} {}{} ago", n, unit, plural)
}

/// Card timestamp, e.g. "04 JAN, 14:06"
pub fn card_date(published: DateTime<Utc>) -> String {
    published.format("%d %b, %H:%M").to_string().to_uppercase()
}

/// Render the current breaking-news slot
pub fn render_breaking(slot: &BreakingSlot) -> String {
    let Some(item) = &slot.item else {
        return String::new();
    };

    format!(
        "<div class=\"breaking-news\" data-position=\"{}\" data-previous=\"{}\" data-next=\"{}\" data-total=\"{}\" data-rotation-secs=\"{}\">\
<span class=\"breaking-label\">BREAKING</span>\
<a class=\"breaking-title\" href=\"#article-{}\">{}</a></div>\n",
        slot.position,
        slot.previous,
        slot.next,
        slot.total,
        slot.rotation_period_secs,
        item.id,
        encode_text(&item.title),
    )
}

/// Headline ticker; the text is repeated once for continuous scrolling
pub fn render_headlines(headlines: &Headlines) -> String {
    let text = encode_text(&headlines.text);
    format!(
        "<div class=\"mobile-ticker\"><span class=\"mobile-ticker-content\">{}{}{}</span></div>\n",
        text, HEADLINE_SEPARATOR, text
    )
}

/// Market ticker rows; unavailable indicators carry no delta styling
pub fn render_market_board(view: &BoardView) -> String {
    let mut buf = String::new();

    buf.push_str("<div class=\"market-ticker\">\n");
    for entry in &view.entries {
        buf.push_str(&render_ticker_entry(entry));
    }
    buf.push_str("</div>\n");

    if let Some(updated_at) = view.updated_at {
        buf.push_str(&format!(
            "<div class=\"market-updated\">Updated {}</div>\n",
            updated_at.format("%H:%M")
        ));
    }

    buf
}

fn render_ticker_entry(entry: &TickerEntry) -> String {
    let label = encode_text(&entry.label);

    match (&entry.value, entry.direction, entry.arrow) {
        (Some(value), Some(direction), Some(arrow)) => {
            let direction = match direction {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Flat => "flat",
            };
            let alert = if entry.alert { " alert" } else { "" };
            format!(
                "<div class=\"ticker-item{}\" data-indicator=\"{}\">\
<span class=\"ticker-label\">{}</span>\
<span class=\"ticker-value\">{}{}</span>\
<span class=\"ticker-change {}\">{}</span></div>\n",
                alert,
                entry.id,
                label,
                encode_text(entry.prefix),
                value,
                direction,
                arrow,
            )
        }
        _ => format!(
            "<div class=\"ticker-item unavailable\" data-indicator=\"{}\">\
<span class=\"ticker-label\">{}</span>\
<span class=\"ticker-value\">unavailable</span></div>\n",
            entry.id, label,
        ),
    }
}
