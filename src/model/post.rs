use serde::{Deserialize, Serialize};

/// Author recorded when a threadline carries no handle
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One post (thread opener or reply) discovered on a listing page
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Page-local thread grouping id; restarts at 1 on every page
    pub thread_id: u32,

    /// `thread_id` plus the threadline position inside its container
    pub post_id: u32,

    pub title: String,

    pub author: String,

    /// Time-stamp text as shown in the listing
    pub time: String,

    /// Body text; empty until the content resolver fills it in
    pub content: String,

    /// Reply depth, 0 for unmarked lines
    pub nesting_level: u32,

    /// True for the thread-opening line of a container
    pub is_first_post: bool,

    /// 1-based listing page the record was found on
    pub page_num: u32,

    /// Absolute detail-page URL, or empty if the listing had no link
    pub url: String,
}

impl PostRecord {
    /// Returns true if this record points at a detail page
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Pagination links found on one listing page
///
/// Disabled links are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Link to older posts (the direction the crawl follows)
    pub older: Option<String>,

    /// Link to newer posts
    pub newer: Option<String>,
}

impl Pagination {
    pub fn is_empty(&self) -> bool {
        self.older.is_none() && self.newer.is_none()
    }
}
