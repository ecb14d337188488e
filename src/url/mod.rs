//! URL handling module for Threadline
//!
//! The forum markup mixes absolute links with bare relative fragments such as
//! `?act=older&page=2` or `post.html?id=9`. They are resolved the way the
//! forum's own frames expect: anything that does not already look absolute is
//! appended to the page URL with its query string cut off. This is plain
//! concatenation, not RFC 3986 joining, and it is applied uniformly to frame
//! sources, pagination links and post links.

/// Returns the URL with everything from the first `?` removed
///
/// # Examples
///
/// ```
/// use threadline::url::strip_query;
///
/// assert_eq!(strip_query("https://host/?forumID=5178"), "https://host/");
/// assert_eq!(strip_query("https://host/left.html"), "https://host/left.html");
/// ```
pub fn strip_query(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Returns true if the reference already carries an http(s) scheme
pub fn looks_absolute(href: &str) -> bool {
    href.starts_with("http")
}

/// Resolves a link reference found on `page_url` to an absolute URL
///
/// Empty references stay empty so callers can tell "no link" apart.
///
/// # Examples
///
/// ```
/// use threadline::url::resolve_href;
///
/// let page = "https://host/left.html?page=1";
/// assert_eq!(resolve_href("?page=2", page), "https://host/left.html?page=2");
/// assert_eq!(resolve_href("https://other/x", page), "https://other/x");
/// assert_eq!(resolve_href("", page), "");
/// ```
pub fn resolve_href(href: &str, page_url: &str) -> String {
    let href = href.trim();
    if href.is_empty() || looks_absolute(href) {
        return href.to_string();
    }
    format!("{}{}", strip_query(page_url), href)
}
