//! Crawler coordinator - whole-run orchestration
//!
//! Runs the pipeline for one forum:
//! - Resolve the frameset root into frame URLs
//! - Walk the listing frame through older pages
//! - Resolve post bodies, one request per distinct URL
//! - Export the records (skipped entirely when there are none)

use crate::config::{validate_forum_id, Config};
use crate::crawler::content::resolve_content;
use crate::crawler::fetcher::HtmlFetcher;
use crate::crawler::frames::discover_frames;
use crate::crawler::pacer::Pacer;
use crate::crawler::paginator::crawl_listing;
use crate::output::{output_path, write_records, DebugSink, RunSummary};
use crate::ScrapeError;
use chrono::Local;
use std::collections::HashSet;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: HtmlFetcher,
    pacer: Pacer,
    debug: DebugSink,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let fetcher = HtmlFetcher::new(&config.fetch)?;
        let pacer = Pacer::new(config.fetch.request_delay());
        let debug = DebugSink::new(config.output.debug_dir());

        Ok(Self {
            config,
            fetcher,
            pacer,
            debug,
        })
    }

    /// Runs the full scrape for one forum
    ///
    /// Remote failures never abort the run; they only shrink the result. The
    /// errors returned are an invalid forum id (checked before any request)
    /// and a failure to write the output file.
    ///
    /// # Arguments
    ///
    /// * `forum_id` - Forum identifier appended to the root URL
    /// * `max_pages` - Listing page budget
    pub async fn run(
        &mut self,
        forum_id: &str,
        max_pages: u32,
    ) -> Result<RunSummary, ScrapeError> {
        validate_forum_id(forum_id)?;

        let root_url = self.config.forum.root_url(forum_id);
        tracing::info!(
            "Scraping data from {}, up to {} page(s)...",
            root_url,
            max_pages
        );

        let frames = discover_frames(&self.fetcher, &root_url, &self.debug).await;

        let mut outcome = crawl_listing(
            &self.fetcher,
            &frames,
            &self.config.forum.listing_frame,
            max_pages,
            &self.debug,
        )
        .await;

        tracing::info!(
            "Fetching content for {} posts across {} pages...",
            outcome.records.len(),
            outcome.pages_visited
        );
        let report = resolve_content(
            &self.fetcher,
            &mut outcome.records,
            0,
            &mut self.pacer,
            &self.debug,
        )
        .await;

        tracing::info!(
            "Found {} posts across up to {} page(s)",
            outcome.records.len(),
            max_pages
        );

        let path = output_path(&self.config.output, forum_id, Local::now());
        let output_file = write_records(&outcome.records, &path)?;

        let distinct_urls = outcome
            .records
            .iter()
            .filter(|r| r.has_url())
            .map(|r| r.url.as_str())
            .collect::<HashSet<_>>()
            .len();

        Ok(RunSummary {
            forum_id: forum_id.to_string(),
            frames_found: frames.len(),
            pages_visited: outcome.pages_visited,
            stop_reason: outcome.stop_reason,
            records: outcome.records.len(),
            distinct_urls,
            urls_resolved: report.resolved.len(),
            urls_failed: report.failed.len(),
            output_file,
        })
    }
}

/// Runs a complete scrape with the given configuration
///
/// # Example
///
/// ```no_run
/// use threadline::config::Config;
/// use threadline::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_scrape(Config::default(), "5178", 2).await?;
/// println!("{} posts", summary.records);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(
    config: Config,
    forum_id: &str,
    max_pages: u32,
) -> Result<RunSummary, ScrapeError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run(forum_id, max_pages).await
}
