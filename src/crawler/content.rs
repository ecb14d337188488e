//! Content resolver
//!
//! Fills in the body text of every record. Content belongs to a URL, not to a
//! record: each distinct URL is fetched at most once per pass and its text is
//! copied onto every record that shares it.

use crate::crawler::fetcher::HtmlFetcher;
use crate::crawler::markup::{element_text, selector};
use crate::crawler::pacer::Pacer;
use crate::model::PostRecord;
use crate::output::{DebugSink, DEBUG_POST_FILE};
use crate::ScrapeError;
use scraper::Html;
use std::collections::HashSet;

/// One way of locating a post body in a detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLocator {
    /// First element matching a CSS selector
    Selector(&'static str),
    /// Text of the whole `<body>`
    DocumentBody,
}

/// Locators tried in order; the first non-empty text wins
///
/// A candidate that matches but holds only whitespace does not end the
/// search: an empty `div.msg` falls through to `div.content`, and so on down
/// to the whole `<body>`.
pub const CONTENT_LOCATORS: &[ContentLocator] = &[
    ContentLocator::Selector("div.msg"),
    ContentLocator::Selector("div.content"),
    ContentLocator::Selector("pre"),
    ContentLocator::Selector("blockquote"),
    ContentLocator::DocumentBody,
];

impl ContentLocator {
    /// Applies this locator, returning trimmed text if it found any
    pub fn locate(&self, document: &Html) -> Result<Option<String>, ScrapeError> {
        let css = match self {
            Self::Selector(css) => *css,
            Self::DocumentBody => "body",
        };

        let text = document
            .select(&selector(css)?)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty());

        Ok(text)
    }
}

/// Extracts the post body from a detail page
///
/// Walks [`CONTENT_LOCATORS`], skipping candidates whose text is empty.
/// Whitespace runs are collapsed to single spaces. Returns an empty string if
/// no locator finds any text.
///
/// # Example
///
/// ```
/// use threadline::crawler::extract_content;
///
/// let html = "<html><body><div class='msg'>\n  Try a\n  factory   reset.\n</div></body></html>";
/// assert_eq!(extract_content(html).unwrap(), "Try a factory reset.");
/// ```
pub fn extract_content(html: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);

    for locator in CONTENT_LOCATORS {
        if let Some(text) = locator.locate(&document)? {
            return Ok(collapse_whitespace(&text));
        }
    }

    Ok(String::new())
}

/// Collapses every whitespace run to one space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// What a content pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentReport {
    /// Detail-page requests issued
    pub fetched: usize,

    /// URLs whose content was filled in, in fetch order
    pub resolved: Vec<String>,

    /// URLs whose fetch or extraction failed, in fetch order
    pub failed: Vec<String>,
}

/// Fetches body text for records starting at `start_index`
///
/// Records before `start_index` are not used to pick URLs, but they still
/// receive content when they share a URL resolved in this pass. A failed URL
/// keeps empty content on all its records and is not fetched again in the
/// same pass. Every request attempt is followed by the pacer's delay.
///
/// # Arguments
///
/// * `fetcher` - HTTP fetcher
/// * `records` - The full record collection, updated in place
/// * `start_index` - First record to consider
/// * `pacer` - Delay enforcer between requests
/// * `debug` - Sink for the first successfully fetched detail page
pub async fn resolve_content(
    fetcher: &HtmlFetcher,
    records: &mut [PostRecord],
    start_index: usize,
    pacer: &mut Pacer,
    debug: &DebugSink,
) -> ContentReport {
    let mut report = ContentReport::default();
    let mut attempted: HashSet<String> = HashSet::new();
    let mut dumped = false;
    let total = records.len();

    for index in start_index..total {
        let url = records[index].url.clone();
        if url.is_empty() || attempted.contains(&url) {
            continue;
        }
        attempted.insert(url.clone());

        tracing::info!(
            "Fetching content for post {}/{}: {}",
            index + 1,
            total,
            records[index].title
        );

        pacer.wait_turn().await;
        let fetched = fetcher.fetch(&url).await;
        pacer.record_attempt();
        report.fetched += 1;

        let content = fetched.and_then(|html| {
            if !dumped {
                debug.dump(DEBUG_POST_FILE, &html);
                dumped = true;
            }
            extract_content(&html)
        });

        match content {
            Ok(content) => {
                apply_content(records, &url, &content);
                report.resolved.push(url);
            }
            Err(e) => {
                tracing::warn!("Error fetching post content for {}: {}", url, e);
                report.failed.push(url);
            }
        }
    }

    tracing::info!(
        "Content pass finished: {} requests, {} resolved, {} failed",
        report.fetched,
        report.resolved.len(),
        report.failed.len()
    );

    report
}

/// Writes `content` onto every record whose URL equals `url`
pub fn apply_content(records: &mut [PostRecord], url: &str, content: &str) -> usize {
    let mut updated = 0;
    for record in records.iter_mut().filter(|r| r.url == url) {
        record.content = content.to_string();
        updated += 1;
    }
    updated
}
