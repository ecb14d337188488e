//! Output module for writing crawl results
//!
//! This module handles:
//! - Exporting post records as CSV
//! - Dumping raw markup for troubleshooting
//! - Reporting end-of-run statistics

mod csv_output;
mod debug;
mod summary;

pub use csv_output::{output_path, read_records, write_records, CSV_COLUMNS};
pub use debug::{DebugSink, DEBUG_FRAMESET_FILE, DEBUG_LISTING_FILE, DEBUG_POST_FILE};
pub use summary::{format_summary, print_summary, RunSummary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
