//! Configuration module for Threadline
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a run without any file
//! behaves exactly like the stock scraper.
//!
//! # Example
//!
//! ```no_run
//! use threadline::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("threadline.toml")).unwrap();
//! println!("Listing frame: {}", config.forum.listing_frame);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, ForumConfig, OutputConfig, DEFAULT_BASE_URL, DEFAULT_FORUM_ID,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::{validate, validate_forum_id};
