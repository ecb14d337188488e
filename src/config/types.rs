use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Forum queried when no `--forum` is given (the Android forum)
pub const DEFAULT_FORUM_ID: &str = "5178";

/// Forum host; the root page is `<base-url>?forumID=<id>`
pub const DEFAULT_BASE_URL: &str = "https://forums.craigslist.org/";

/// Browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Threadline
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub forum: ForumConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// Which forum host to read and where its listing lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForumConfig {
    /// Base URL of the forum host (query string is appended per forum)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Frame identifier holding the threaded-post listing
    #[serde(rename = "listing-frame")]
    pub listing_frame: String,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_frame: "L".to_string(),
        }
    }
}

impl ForumConfig {
    /// Builds the frameset root URL for a forum identifier
    pub fn root_url(&self, forum_id: &str) -> String {
        format!("{}?forumID={}", self.base_url, forum_id)
    }
}

/// HTTP behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Pause after every detail-page fetch (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout in seconds; 0 leaves the transport default
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_delay_ms: 1000,
            timeout_secs: 30,
        }
    }
}

impl FetchConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV file is written into
    pub directory: String,

    /// File name prefix, followed by `_<forum>_<timestamp>.csv`
    #[serde(rename = "file-prefix")]
    pub file_prefix: String,

    /// Directory for raw markup dumps; empty disables them
    #[serde(rename = "debug-dir")]
    pub debug_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            file_prefix: "craigslist_forum_data".to_string(),
            debug_dir: ".".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn debug_dir(&self) -> Option<PathBuf> {
        (!self.debug_dir.is_empty()).then(|| PathBuf::from(&self.debug_dir))
    }
}
