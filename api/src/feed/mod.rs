//! Feed module
//!
//! HTML fragment rendering for the site's feed, tickers and market board.

pub mod renderer;

pub use renderer::{render_breaking, render_feed_page, render_headlines, render_market_board};
