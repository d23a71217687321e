//! Market quote adapter

pub mod client;

pub use client::HttpMarketDataSource;
