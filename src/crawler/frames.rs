//! Frame resolver
//!
//! The forum root is a frameset: the threaded listing lives in one frame and
//! the selected post in another. This module maps each `<frame id=... src=...>`
//! to an absolute URL so the crawl can start from the listing frame.

use crate::crawler::fetcher::HtmlFetcher;
use crate::crawler::markup::selector;
use crate::model::FrameMap;
use crate::output::{DebugSink, DEBUG_FRAMESET_FILE};
use crate::url::resolve_href;
use crate::ScrapeError;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use scraper::Html;

/// Extracts the frame map from frameset markup
///
/// Frames missing either an `id` or a `src` are skipped. A page without any
/// frames yields an empty map.
///
/// The tree builder drops `<frame>` elements once a page has entered its
/// body, which happens when a server wraps the frameset in `<body>`. When the
/// parsed tree holds no frames, the raw start tags are scanned instead.
///
/// # Example
///
/// ```
/// use threadline::crawler::resolve_frames;
///
/// let html = r#"<html><frameset><frame id="L" src="left.html"></frameset></html>"#;
/// let frames = resolve_frames(html, "https://host/?forumID=1").unwrap();
/// assert_eq!(frames.get("L"), Some("https://host/left.html"));
/// ```
pub fn resolve_frames(html: &str, root_url: &str) -> Result<FrameMap, ScrapeError> {
    let document = Html::parse_document(html);
    let frame_selector = selector("frame")?;

    let frames: FrameMap = document
        .select(&frame_selector)
        .filter_map(|frame| {
            let frame = frame.value();
            frame_entry(frame.attr("id"), frame.attr("src"), root_url)
        })
        .collect();

    if !frames.is_empty() {
        return Ok(frames);
    }

    let tags = scan_frame_tags(html);
    if !tags.is_empty() {
        tracing::debug!("Frameset outside tree, found {} frame tags by scan", tags.len());
    }

    Ok(tags
        .iter()
        .filter_map(|(id, src)| frame_entry(id.as_deref(), src.as_deref(), root_url))
        .collect())
}

fn frame_entry(id: Option<&str>, src: Option<&str>, root_url: &str) -> Option<(String, String)> {
    let id = id.filter(|id| !id.is_empty())?;
    let src = src.filter(|src| !src.is_empty())?;
    Some((id.to_string(), resolve_href(src, root_url)))
}

/// Collects `id`/`src` of every `<frame>` start tag, in document order
#[derive(Default)]
struct FrameTagSink {
    tags: Vec<(Option<String>, Option<String>)>,
}

impl FrameTagSink {
    fn record(&mut self, tag: &Tag) {
        let attr = |name: &str| {
            tag.attrs
                .iter()
                .find(|attr| &*attr.name.local == name)
                .map(|attr| attr.value.to_string())
        };
        self.tags.push((attr("id"), attr("src")));
    }
}

impl TokenSink for FrameTagSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(tag) = token {
            if tag.kind == TagKind::StartTag && &*tag.name == "frame" {
                self.record(&tag);
            }
        }
        TokenSinkResult::Continue
    }
}

fn scan_frame_tags(html: &str) -> Vec<(Option<String>, Option<String>)> {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(FrameTagSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.tags
}

/// Fetches the root page and resolves its frames
///
/// Any failure here is logged and yields an empty map; the caller then finds
/// no listing frame and the run produces no records.
pub async fn discover_frames(
    fetcher: &HtmlFetcher,
    root_url: &str,
    debug: &DebugSink,
) -> FrameMap {
    tracing::info!("Fetching main page: {}", root_url);

    let html = match fetcher.fetch(root_url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Error fetching the page: {}", e);
            return FrameMap::default();
        }
    };

    debug.dump(DEBUG_FRAMESET_FILE, &html);

    match resolve_frames(&html, root_url) {
        Ok(frames) => {
            tracing::info!(
                "Found {} frames: {}",
                frames.len(),
                frames.ids().collect::<Vec<_>>().join(", ")
            );
            frames
        }
        Err(e) => {
            tracing::error!("Failed to parse frameset {}: {}", root_url, e);
            FrameMap::default()
        }
    }
}
