//! Paginated crawl driver
//!
//! Starts at the listing frame and walks backward through history by
//! following each page's "older" link, strictly one page at a time, until
//! the page budget is spent, a page yields no posts, or no older link is
//! left.

use crate::crawler::fetcher::HtmlFetcher;
use crate::crawler::listing::{parse_listing_page, ListingPage};
use crate::model::{FrameMap, PostRecord};
use crate::output::{DebugSink, DEBUG_LISTING_FILE};
use std::collections::HashSet;
use std::fmt;

/// Why the listing crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The frame map had no listing frame; nothing was fetched
    NoListingFrame,
    /// A page yielded no posts (or could not be fetched)
    Exhausted,
    /// The requested number of pages was visited
    BudgetReached,
    /// The last page had no enabled "older" link
    NoOlderLink,
    /// The "older" link pointed at a page already visited this run
    Revisit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoListingFrame => "no listing frame",
            Self::Exhausted => "no posts on page",
            Self::BudgetReached => "page budget reached",
            Self::NoOlderLink => "no older link",
            Self::Revisit => "older link already visited",
        };
        f.write_str(text)
    }
}

/// Result of a listing crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// All records in page order, then document order
    pub records: Vec<PostRecord>,

    /// Pages actually fetched, including a final empty one
    pub pages_visited: u32,

    pub stop_reason: StopReason,
}

/// Crawls up to `max_pages` listing pages starting at the listing frame
///
/// # Arguments
///
/// * `fetcher` - HTTP fetcher
/// * `frames` - Frame map resolved from the root page
/// * `listing_frame` - Identifier of the listing frame (normally `"L"`)
/// * `max_pages` - Page budget; 0 visits nothing
/// * `debug` - Sink for the first listing page's raw markup
pub async fn crawl_listing(
    fetcher: &HtmlFetcher,
    frames: &FrameMap,
    listing_frame: &str,
    max_pages: u32,
    debug: &DebugSink,
) -> CrawlOutcome {
    let mut records = Vec::new();
    let mut pages_visited = 0;

    let Some(start_url) = frames.get(listing_frame) else {
        tracing::warn!("No '{}' frame found; nothing to crawl", listing_frame);
        return CrawlOutcome {
            records,
            pages_visited,
            stop_reason: StopReason::NoListingFrame,
        };
    };

    let mut visited: HashSet<String> = HashSet::new();
    let mut current_url = start_url.to_string();
    let mut page_num = 1;

    let stop_reason = loop {
        if page_num > max_pages {
            break StopReason::BudgetReached;
        }

        visited.insert(current_url.clone());
        pages_visited += 1;

        let page = fetch_listing_page(fetcher, &current_url, page_num, debug).await;

        if page.records.is_empty() {
            tracing::info!("No posts found on page {}. Stopping.", page_num);
            break StopReason::Exhausted;
        }

        records.extend(page.records);

        if page_num == max_pages {
            break StopReason::BudgetReached;
        }

        let Some(older) = page.pagination.older else {
            tracing::info!(
                "No 'older' pagination link found or it's disabled. Reached the last page."
            );
            break StopReason::NoOlderLink;
        };

        if visited.contains(&older) {
            tracing::warn!("'older' link {} was already visited. Stopping.", older);
            break StopReason::Revisit;
        }

        current_url = older;
        page_num += 1;
    };

    tracing::info!(
        "Listing crawl finished: {} posts across {} pages ({})",
        records.len(),
        pages_visited,
        stop_reason
    );

    CrawlOutcome {
        records,
        pages_visited,
        stop_reason,
    }
}

/// Fetches and parses one listing page
///
/// Fetch and parse failures are logged and reported as an empty page; the
/// page is not retried.
pub async fn fetch_listing_page(
    fetcher: &HtmlFetcher,
    url: &str,
    page_num: u32,
    debug: &DebugSink,
) -> ListingPage {
    tracing::info!("Fetching page {}: {}", page_num, url);

    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Error fetching page {}: {}", page_num, e);
            return ListingPage::default();
        }
    };

    if page_num == 1 {
        debug.dump(DEBUG_LISTING_FILE, &html);
    }

    match parse_listing_page(&html, url, page_num) {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Error parsing page {}: {}", page_num, e);
            ListingPage::default()
        }
    }
}
