//! Data model shared by the crawl pipeline
//!
//! - [`FrameMap`]: frame identifier to absolute URL, built from the root page
//! - [`PostRecord`]: one row per post discovered on a listing page
//! - [`Pagination`]: the older/newer links present on one listing page

mod frames;
mod post;

pub use frames::FrameMap;
pub use post::{Pagination, PostRecord, UNKNOWN_AUTHOR};
