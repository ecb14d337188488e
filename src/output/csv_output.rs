//! CSV export of post records
//!
//! One file per run, header row first, columns in [`CSV_COLUMNS`] order. An
//! empty record collection produces no file at all.

use crate::config::OutputConfig;
use crate::model::PostRecord;
use crate::output::OutputResult;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Column order of the exported file
pub const CSV_COLUMNS: [&str; 10] = [
    "thread_id",
    "post_id",
    "title",
    "author",
    "time",
    "content",
    "nesting_level",
    "is_first_post",
    "page_num",
    "url",
];

/// Builds `<directory>/<prefix>_<forum>_<YYYYmmdd_HHMMSS>.csv`
pub fn output_path<Tz>(config: &OutputConfig, forum_id: &str, now: DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let file_name = format!(
        "{}_{}_{}.csv",
        config.file_prefix,
        forum_id,
        now.format("%Y%m%d_%H%M%S")
    );
    Path::new(&config.directory).join(file_name)
}

/// Writes records to a CSV file
///
/// # Returns
///
/// * `Ok(Some(path))` - The file was written
/// * `Ok(None)` - There were no records, so nothing was written
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_records(records: &[PostRecord], path: &Path) -> OutputResult<Option<PathBuf>> {
    if records.is_empty() {
        tracing::warn!("No data to save!");
        return Ok(None);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!("Data saved to {}", path.display());
    Ok(Some(path.to_path_buf()))
}

/// Reads records back from a file written by [`write_records`]
pub fn read_records(path: &Path) -> OutputResult<Vec<PostRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<PostRecord>, csv::Error>>()?;
    Ok(records)
}
