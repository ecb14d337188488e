//! Integration tests for the crawl pipeline
//!
//! These tests use wiremock to serve a small frameset forum and exercise
//! frame discovery, the paginated listing walk, content resolution and the
//! CSV export end-to-end.

use std::time::{Duration, Instant};
use tempfile::TempDir;
use threadline::config::{Config, FetchConfig, ForumConfig, OutputConfig};
use threadline::crawler::{
    crawl_listing, discover_frames, resolve_content, run_scrape, HtmlFetcher, Pacer, StopReason,
};
use threadline::model::{FrameMap, PostRecord};
use threadline::output::{
    read_records, DebugSink, DEBUG_FRAMESET_FILE, DEBUG_LISTING_FILE, DEBUG_POST_FILE,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "TestAgent/1.0";

fn fetch_config() -> FetchConfig {
    FetchConfig {
        user_agent: USER_AGENT.to_string(),
        request_delay_ms: 0,
        timeout_secs: 5,
    }
}

fn fetcher() -> HtmlFetcher {
    HtmlFetcher::new(&fetch_config()).expect("Failed to build fetcher")
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, output_dir: &TempDir) -> Config {
    let dir = output_dir.path().to_string_lossy().to_string();
    Config {
        forum: ForumConfig {
            base_url: format!("{}/", base_url),
            listing_frame: "L".to_string(),
        },
        fetch: fetch_config(),
        output: OutputConfig {
            directory: dir.clone(),
            file_prefix: "forum_test".to_string(),
            debug_dir: dir,
        },
    }
}

fn frameset() -> String {
    r#"<html><head><title>forums</title></head>
    <frameset cols="35%,65%">
        <frame id="L" src="left.html">
        <frame id="R" src="right.html">
    </frameset></html>"#
        .to_string()
}

/// One thread per entry: (title, post url, reply urls)
fn listing_page(threads: &[(&str, &str, &[&str])], older: Option<&str>) -> String {
    let mut body = String::from(r#"<html><body><div class="threadpaginator">"#);
    match older {
        Some(href) => body.push_str(&format!(r#"<a class="previous" href="{}">older</a>"#, href)),
        None => body.push_str(r##"<a class="previous disabled" href="#">older</a>"##),
    }
    body.push_str("</div>");

    for (title, url, replies) in threads {
        body.push_str(r#"<article class="thread">"#);
        body.push_str(&format!(
            r#"<div class="threadline first"><a class="title" href="{}">{}</a><span class="handle">op</span><time>Mar 1</time></div>"#,
            url, title
        ));
        for (i, reply) in replies.iter().enumerate() {
            body.push_str(&format!(
                r#"<div class="threadline"><span class="dotz">: . .</span><a class="title" href="{}">Re: {} #{}</a><span class="handle">replier</span><time>Mar 2</time></div>"#,
                reply, title, i
            ));
        }
        body.push_str("</article>");
    }

    body.push_str("</body></html>");
    body
}

fn detail_page(text: &str) -> String {
    format!(
        r#"<html><body><div class="nav">nav</div><div class="msg">
        {}
        </div></body></html>"#,
        text
    )
}

async fn mount_html(server: &MockServer, route: &str, html: String, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn record(url: &str) -> PostRecord {
    PostRecord {
        thread_id: 1,
        post_id: 1,
        title: "title".to_string(),
        author: "op".to_string(),
        time: "Mar 1".to_string(),
        content: String::new(),
        nesting_level: 0,
        is_first_post: true,
        page_num: 1,
        url: url.to_string(),
    }
}

#[tokio::test]
async fn test_discover_frames_from_root() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("forumID", "5178"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(frameset()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let root_url = format!("{}/?forumID=5178", base_url);
    let frames = discover_frames(&fetcher(), &root_url, &DebugSink::disabled()).await;

    assert_eq!(frames.len(), 2);
    assert_eq!(frames.get("L"), Some(format!("{}/left.html", base_url).as_str()));
    assert_eq!(frames.get("R"), Some(format!("{}/right.html", base_url).as_str()));
}

#[tokio::test]
async fn test_root_failure_yields_empty_frames() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let root_url = format!("{}/?forumID=1", mock_server.uri());
    let frames = discover_frames(&fetcher(), &root_url, &DebugSink::disabled()).await;

    assert!(frames.is_empty());
}

#[tokio::test]
async fn test_crawl_follows_older_links_until_disabled() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let page2 = format!("{}/older/2", base_url);
    let page3 = format!("{}/older/3", base_url);

    mount_html(
        &mock_server,
        "/left.html",
        listing_page(&[("one", "/p/1", &["/p/2"])], Some(&page2)),
        1,
    )
    .await;
    mount_html(
        &mock_server,
        "/older/2",
        listing_page(&[("two", "/p/3", &[]), ("three", "/p/4", &[])], Some(&page3)),
        1,
    )
    .await;
    mount_html(&mock_server, "/older/3", listing_page(&[("four", "/p/5", &[])], None), 1).await;

    let frames: FrameMap = [("L", format!("{}/left.html", base_url))].into_iter().collect();
    let outcome = crawl_listing(&fetcher(), &frames, "L", 5, &DebugSink::disabled()).await;

    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(outcome.stop_reason, StopReason::NoOlderLink);
    assert_eq!(outcome.records.len(), 5);

    let pages: Vec<u32> = outcome.records.iter().map(|r| r.page_num).collect();
    assert_eq!(pages, vec![1, 1, 2, 2, 3]);

    // Thread ids restart on every page
    let thread_ids: Vec<u32> = outcome.records.iter().map(|r| r.thread_id).collect();
    assert_eq!(thread_ids, vec![1, 1, 1, 2, 1]);

    let levels: Vec<u32> = outcome.records.iter().map(|r| r.nesting_level).collect();
    assert_eq!(levels, vec![0, 1, 0, 0, 0]);
}

#[tokio::test]
async fn test_crawl_respects_page_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let page2 = format!("{}/older/2", base_url);
    let page3 = format!("{}/older/3", base_url);

    mount_html(
        &mock_server,
        "/left.html",
        listing_page(&[("a", "/p/a", &[])], Some(&page2)),
        1,
    )
    .await;
    mount_html(
        &mock_server,
        "/older/2",
        listing_page(&[("b", "/p/b", &[])], Some(&page3)),
        1,
    )
    .await;
    mount_html(&mock_server, "/older/3", listing_page(&[("c", "/p/c", &[])], None), 0).await;

    let frames: FrameMap = [("L", format!("{}/left.html", base_url))].into_iter().collect();
    let outcome = crawl_listing(&fetcher(), &frames, "L", 2, &DebugSink::disabled()).await;

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.stop_reason, StopReason::BudgetReached);
    assert_eq!(outcome.records.len(), 2);
}

#[tokio::test]
async fn test_page_without_threads_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let page2 = format!("{}/older/2", base_url);
    let page3 = format!("{}/older/3", base_url);

    mount_html(
        &mock_server,
        "/left.html",
        listing_page(&[("a", "/p/a", &[])], Some(&page2)),
        1,
    )
    .await;
    mount_html(&mock_server, "/older/2", listing_page(&[], Some(&page3)), 1).await;
    mount_html(&mock_server, "/older/3", listing_page(&[("c", "/p/c", &[])], None), 0).await;

    let frames: FrameMap = [("L", format!("{}/left.html", base_url))].into_iter().collect();
    let outcome = crawl_listing(&fetcher(), &frames, "L", 10, &DebugSink::disabled()).await;

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.stop_reason, StopReason::Exhausted);
    assert_eq!(outcome.records.len(), 1);
}

#[tokio::test]
async fn test_listing_fetch_failure_is_treated_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/left.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let frames: FrameMap = [("L", format!("{}/left.html", mock_server.uri()))]
        .into_iter()
        .collect();
    let outcome = crawl_listing(&fetcher(), &frames, "L", 3, &DebugSink::disabled()).await;

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.pages_visited, 1);
    assert_eq!(outcome.stop_reason, StopReason::Exhausted);
}

#[tokio::test]
async fn test_older_link_back_to_visited_page_stops() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let page1 = format!("{}/left.html", base_url);
    let page2 = format!("{}/older/2", base_url);

    mount_html(
        &mock_server,
        "/left.html",
        listing_page(&[("a", "/p/a", &[])], Some(&page2)),
        1,
    )
    .await;
    mount_html(
        &mock_server,
        "/older/2",
        listing_page(&[("b", "/p/b", &[])], Some(&page1)),
        1,
    )
    .await;

    let frames: FrameMap = [("L", page1.clone())].into_iter().collect();
    let outcome = crawl_listing(&fetcher(), &frames, "L", 10, &DebugSink::disabled()).await;

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.stop_reason, StopReason::Revisit);
}

#[tokio::test]
async fn test_single_page_with_disabled_older_link() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/left.html",
        listing_page(&[("opener", "/p/1", &["/p/2", "/p/3"])], None),
        1,
    )
    .await;

    let frames: FrameMap = [("L", format!("{}/left.html", mock_server.uri()))]
        .into_iter()
        .collect();
    let outcome = crawl_listing(&fetcher(), &frames, "L", 5, &DebugSink::disabled()).await;

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.pages_visited, 1);
    assert_eq!(outcome.stop_reason, StopReason::NoOlderLink);

    let levels: Vec<u32> = outcome.records.iter().map(|r| r.nesting_level).collect();
    assert_eq!(levels, vec![0, 1, 1]);
    assert!(outcome.records[0].is_first_post);
}

#[tokio::test]
async fn test_shared_url_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/p/1", detail_page("Same   body\n for both"), 1).await;

    let url = format!("{}/p/1", base_url);
    let mut records = vec![record(&url), record(""), record(&url)];
    let mut pacer = Pacer::new(Duration::ZERO);

    let report = resolve_content(
        &fetcher(),
        &mut records,
        0,
        &mut pacer,
        &DebugSink::disabled(),
    )
    .await;

    assert_eq!(report.fetched, 1);
    assert_eq!(report.resolved, vec![url.clone()]);
    assert!(report.failed.is_empty());

    assert_eq!(records[0].content, "Same body for both");
    assert_eq!(records[0].content, records[2].content);
    assert_eq!(records[1].content, "");
}

#[tokio::test]
async fn test_failed_url_keeps_empty_content_and_is_not_refetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/p/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/p/ok", detail_page("fine"), 1).await;

    let broken = format!("{}/p/broken", base_url);
    let ok = format!("{}/p/ok", base_url);
    let mut records = vec![record(&broken), record(&ok), record(&broken)];
    let mut pacer = Pacer::new(Duration::ZERO);

    let report = resolve_content(
        &fetcher(),
        &mut records,
        0,
        &mut pacer,
        &DebugSink::disabled(),
    )
    .await;

    assert_eq!(report.fetched, 2);
    assert_eq!(report.failed, vec![broken]);
    assert_eq!(report.resolved, vec![ok]);
    assert_eq!(records[0].content, "");
    assert_eq!(records[1].content, "fine");
    assert_eq!(records[2].content, "");
}

#[tokio::test]
async fn test_resume_index_skips_earlier_records_but_propagates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/p/a", detail_page("A"), 1).await;
    mount_html(&mock_server, "/p/b", detail_page("B"), 0).await;

    let a = format!("{}/p/a", base_url);
    let b = format!("{}/p/b", base_url);
    let mut records = vec![record(&a), record(&b), record(&a)];
    let mut pacer = Pacer::new(Duration::ZERO);

    let report = resolve_content(
        &fetcher(),
        &mut records,
        2,
        &mut pacer,
        &DebugSink::disabled(),
    )
    .await;

    assert_eq!(report.fetched, 1);
    assert_eq!(records[0].content, "A");
    assert_eq!(records[1].content, "");
    assert_eq!(records[2].content, "A");
}

#[tokio::test]
async fn test_requests_are_paced() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/p/1", detail_page("one"), 1).await;
    mount_html(&mock_server, "/p/2", detail_page("two"), 1).await;
    mount_html(&mock_server, "/p/3", detail_page("three"), 1).await;

    let mut records: Vec<PostRecord> = (1..=3)
        .map(|i| record(&format!("{}/p/{}", base_url, i)))
        .collect();
    let mut pacer = Pacer::new(Duration::from_millis(100));

    let start = Instant::now();
    resolve_content(&fetcher(), &mut records, 0, &mut pacer, &DebugSink::disabled()).await;

    // Two gaps between three requests
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_full_scrape_writes_csv_and_debug_files() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let output_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("forumID", "77"))
        .respond_with(ResponseTemplate::new(200).set_body_string(frameset()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page2 = format!("{}/older/2", base_url);
    let post1 = format!("{}/p/1", base_url);
    let post2 = format!("{}/p/2", base_url);
    mount_html(
        &mock_server,
        "/left.html",
        listing_page(&[("battery", &post1, &[&post2])], Some(&page2)),
        1,
    )
    .await;
    mount_html(&mock_server, "/older/2", listing_page(&[("screen", &post1, &[])], None), 1).await;
    mount_html(&mock_server, "/p/1", detail_page("Battery drains fast."), 1).await;
    mount_html(&mock_server, "/p/2", detail_page("Check the apps."), 1).await;

    let config = create_test_config(&base_url, &output_dir);
    let summary = run_scrape(config, "77", 3).await.expect("Scrape failed");

    assert_eq!(summary.frames_found, 2);
    assert_eq!(summary.pages_visited, 2);
    assert_eq!(summary.stop_reason, StopReason::NoOlderLink);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.distinct_urls, 2);
    assert_eq!(summary.urls_resolved, 2);
    assert_eq!(summary.urls_failed, 0);

    let csv_path = summary.output_file.expect("CSV should be written");
    let file_name = csv_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("forum_test_77_"));
    assert!(file_name.ends_with(".csv"));

    let records = read_records(&csv_path).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].title, "battery");
    assert_eq!(records[0].content, "Battery drains fast.");
    assert_eq!(records[1].content, "Check the apps.");
    assert_eq!(records[1].nesting_level, 1);
    assert_eq!(records[2].page_num, 2);
    assert_eq!(records[2].content, records[0].content);

    for name in [DEBUG_FRAMESET_FILE, DEBUG_LISTING_FILE, DEBUG_POST_FILE] {
        assert!(output_dir.path().join(name).exists(), "missing {}", name);
    }
}

#[tokio::test]
async fn test_no_listing_frame_writes_no_file() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>No frames here</body></html>"),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &output_dir);
    let summary = run_scrape(config, "1", 2).await.expect("Scrape failed");

    assert_eq!(summary.records, 0);
    assert_eq!(summary.pages_visited, 0);
    assert_eq!(summary.stop_reason, StopReason::NoListingFrame);
    assert!(summary.output_file.is_none());

    let csv_files = std::fs::read_dir(output_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "csv"))
        .count();
    assert_eq!(csv_files, 0);
}
