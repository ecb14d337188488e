//! End-of-run statistics

use crate::crawler::StopReason;
use std::path::PathBuf;

/// What one run did, for the operator
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub forum_id: String,

    /// Frames found on the root page
    pub frames_found: usize,

    pub pages_visited: u32,

    pub stop_reason: StopReason,

    /// Posts exported
    pub records: usize,

    /// Distinct non-empty post URLs
    pub distinct_urls: usize,

    pub urls_resolved: usize,

    pub urls_failed: usize,

    /// Written CSV file, `None` when there was no data
    pub output_file: Option<PathBuf>,
}

/// Formats a run summary as plain text
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Forum {} ===\n", summary.forum_id));
    out.push_str(&format!("  Frames found: {}\n", summary.frames_found));
    out.push_str(&format!(
        "  Pages visited: {} (stopped: {})\n",
        summary.pages_visited, summary.stop_reason
    ));
    out.push_str(&format!("  Posts: {}\n", summary.records));
    out.push_str(&format!(
        "  Post URLs: {} ({} resolved, {} failed)\n",
        summary.distinct_urls, summary.urls_resolved, summary.urls_failed
    ));

    match &summary.output_file {
        Some(path) => out.push_str(&format!("  Output: {}\n", path.display())),
        None => out.push_str("  Output: none (no data)\n"),
    }

    out
}

/// Prints a run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    print!("{}", format_summary(summary));
}
