//! Listing page parser
//!
//! A listing page is a sequence of `article.thread` containers, each holding
//! one `div.threadline` per post. The opener carries the `first` class and
//! replies mark their depth with repeated `: . .` runs inside `span.dotz`.
//! The `div.threadpaginator` block links to older and newer pages; disabled
//! links carry the `disabled` class.

use crate::crawler::markup::{element_text, first_text, has_class, selector};
use crate::model::{Pagination, PostRecord, UNKNOWN_AUTHOR};
use crate::url::resolve_href;
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// One reply-depth step inside `span.dotz`
pub const DEPTH_MARKER: &str = ": . .";

/// Everything extracted from one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Posts in document order
    pub records: Vec<PostRecord>,

    /// Enabled pagination links
    pub pagination: Pagination,
}

/// Compiled selectors for the listing dialect
struct ListingSelectors {
    paginator: Selector,
    older: Selector,
    newer: Selector,
    thread: Selector,
    threadline: Selector,
    title: Selector,
    handle: Selector,
    time: Selector,
    dotz: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            paginator: selector("div.threadpaginator")?,
            older: selector("a.previous")?,
            newer: selector("a.next")?,
            thread: selector("article.thread")?,
            threadline: selector("div.threadline")?,
            title: selector("a.title")?,
            handle: selector("span.handle")?,
            time: selector("time")?,
            dotz: selector("span.dotz")?,
        })
    }
}

/// Parses one listing page into post records and pagination links
///
/// # Id scheme
///
/// `thread_id` starts at 1 on every page. Inside a container,
/// `post_id = thread_id + position`, and after the container `thread_id`
/// advances by the number of threadlines it holds, counting lines that were
/// skipped for lacking a title link. Ids are therefore page-local and may
/// collide across pages.
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `page_url` - URL the page was fetched from, used to resolve relative links
/// * `page_num` - 1-based page number stamped on every record
///
/// # Example
///
/// ```
/// use threadline::crawler::parse_listing_page;
///
/// let html = r#"<article class="thread">
///   <div class="threadline first"><a class="title" href="?ID=1">Hi</a></div>
/// </article>"#;
/// let page = parse_listing_page(html, "https://host/left.html", 1).unwrap();
/// assert_eq!(page.records[0].url, "https://host/left.html?ID=1");
/// ```
pub fn parse_listing_page(
    html: &str,
    page_url: &str,
    page_num: u32,
) -> Result<ListingPage, ScrapeError> {
    let document = Html::parse_document(html);
    let selectors = ListingSelectors::new()?;

    let pagination = extract_pagination(&document, &selectors, page_url);

    let mut records = Vec::new();
    let mut thread_id: u32 = 1;

    for thread in document.select(&selectors.thread) {
        let threadlines: Vec<ElementRef<'_>> = thread.select(&selectors.threadline).collect();
        if threadlines.is_empty() {
            continue;
        }

        for (position, line) in threadlines.iter().enumerate() {
            let Some(record) = parse_threadline(
                *line,
                &selectors,
                page_url,
                page_num,
                thread_id,
                thread_id + position as u32,
            ) else {
                continue;
            };

            tracing::debug!(
                "Post {} (Page {}): {} by {} (nesting level: {})",
                record.post_id,
                page_num,
                record.title,
                record.author,
                record.nesting_level
            );
            records.push(record);
        }

        thread_id += threadlines.len() as u32;
    }

    tracing::info!(
        "Found {} posts on page {} ({})",
        records.len(),
        page_num,
        page_url
    );

    Ok(ListingPage {
        records,
        pagination,
    })
}

/// Builds a record from one threadline, or `None` if it has no title link
fn parse_threadline(
    line: ElementRef<'_>,
    selectors: &ListingSelectors,
    page_url: &str,
    page_num: u32,
    thread_id: u32,
    post_id: u32,
) -> Option<PostRecord> {
    let title_link = line.select(&selectors.title).next()?;

    let url = title_link
        .value()
        .attr("href")
        .map(|href| resolve_href(href, page_url))
        .unwrap_or_default();

    let author =
        first_text(line, &selectors.handle).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
    let time = first_text(line, &selectors.time).unwrap_or_default();

    let nesting_level = line
        .select(&selectors.dotz)
        .next()
        .map(|dotz| nesting_level(&dotz.text().collect::<String>()))
        .unwrap_or(0);

    Some(PostRecord {
        thread_id,
        post_id,
        title: element_text(title_link),
        author,
        time,
        content: String::new(),
        nesting_level,
        is_first_post: has_class(line, "first"),
        page_num,
        url,
    })
}

/// Counts non-overlapping depth markers in a `span.dotz` text
pub fn nesting_level(dotz_text: &str) -> u32 {
    dotz_text.matches(DEPTH_MARKER).count() as u32
}

/// Extracts the enabled older/newer links from the paginator block
fn extract_pagination(
    document: &Html,
    selectors: &ListingSelectors,
    page_url: &str,
) -> Pagination {
    let Some(paginator) = document.select(&selectors.paginator).next() else {
        return Pagination::default();
    };

    let older = enabled_link(paginator, &selectors.older, page_url);
    if let Some(url) = &older {
        tracing::debug!("Found 'older' posts link: {}", url);
    }

    let newer = enabled_link(paginator, &selectors.newer, page_url);
    if let Some(url) = &newer {
        tracing::debug!("Found 'newer' posts link: {}", url);
    }

    Pagination { older, newer }
}

fn enabled_link(paginator: ElementRef<'_>, link: &Selector, page_url: &str) -> Option<String> {
    let anchor = paginator.select(link).next()?;
    if has_class(anchor, "disabled") {
        return None;
    }

    anchor
        .value()
        .attr("href")
        .filter(|href| !href.trim().is_empty())
        .map(|href| resolve_href(href, page_url))
}
