use crate::config::types::{Config, FetchConfig, ForumConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_forum_config(&config.forum)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates a forum identifier
///
/// The id ends up in both the root URL query and the output file name, so
/// only ASCII letters, digits, `-` and `_` are accepted.
pub fn validate_forum_id(forum_id: &str) -> Result<(), ConfigError> {
    if forum_id.is_empty() {
        return Err(ConfigError::Validation(
            "forum id cannot be empty".to_string(),
        ));
    }

    if !forum_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "forum id must contain only letters, digits, '-' and '_', got '{}'",
            forum_id
        )));
    }

    Ok(())
}

/// Validates forum location settings
fn validate_forum_config(config: &ForumConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.query().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must not carry a query string",
            config.base_url
        )));
    }

    if config.listing_frame.trim().is_empty() {
        return Err(ConfigError::Validation(
            "listing-frame cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP settings
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output settings
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.file_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "file-prefix cannot be empty".to_string(),
        ));
    }

    if config.file_prefix.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "file-prefix must be a plain file name, got '{}'",
            config.file_prefix
        )));
    }

    Ok(())
}
