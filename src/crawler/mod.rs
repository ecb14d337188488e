//! Crawler module for forum fetching and parsing
//!
//! This module contains the core crawl pipeline:
//! - HTTP fetching with a fixed browser identity
//! - Frameset resolution to find the listing frame
//! - Listing page parsing (posts, nesting, pagination)
//! - The paginated walk through older pages
//! - Body text resolution under a fixed request delay
//! - Overall run coordination

mod content;
mod coordinator;
mod fetcher;
mod frames;
mod listing;
mod markup;
mod pacer;
mod paginator;

pub use content::{
    apply_content, collapse_whitespace, extract_content, resolve_content, ContentLocator,
    ContentReport, CONTENT_LOCATORS,
};
pub use coordinator::{run_scrape, Coordinator};
pub use fetcher::{build_http_client, HtmlFetcher};
pub use frames::{discover_frames, resolve_frames};
pub use listing::{nesting_level, parse_listing_page, ListingPage, DEPTH_MARKER};
pub use pacer::Pacer;
pub use paginator::{crawl_listing, fetch_listing_page, CrawlOutcome, StopReason};
