//! Raw markup dumps for troubleshooting
//!
//! Not part of the data output. Write failures are logged and ignored.

use std::path::PathBuf;

/// Root frameset page
pub const DEBUG_FRAMESET_FILE: &str = "debug_frameset.html";

/// First listing page
pub const DEBUG_LISTING_FILE: &str = "debug_left_frame.html";

/// First detail page fetched
pub const DEBUG_POST_FILE: &str = "debug_post_content.html";

/// Writes raw markup into a directory, or does nothing when disabled
#[derive(Debug, Clone, Default)]
pub struct DebugSink {
    dir: Option<PathBuf>,
}

impl DebugSink {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn disabled() -> Self {
        Self { dir: None }
    }

    /// Saves `html` verbatim under `file_name`
    ///
    /// Returns the written path, or `None` if disabled or the write failed.
    pub fn dump(&self, file_name: &str, html: &str) -> Option<PathBuf> {
        let path = self.dir.as_ref()?.join(file_name);

        match std::fs::write(&path, html) {
            Ok(()) => {
                tracing::debug!("Saved HTML to {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Failed to save HTML to {}: {}", path.display(), e);
                None
            }
        }
    }
}
