use crate::config::types::{BrowserSettings, Config, CrawlerSettings, StorageSettings};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_settings(&config.crawler)?;
    validate_browser_settings(&config.browser)?;
    validate_storage_settings(&config.storage)?;
    Ok(())
}

/// Validates fetch and extraction settings
fn validate_crawler_settings(settings: &CrawlerSettings) -> Result<(), ConfigError> {
    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if settings.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be > 0".to_string(),
        ));
    }

    if settings.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be > 0".to_string(),
        ));
    }

    if settings.min_static_words < 1 {
        return Err(ConfigError::Validation(format!(
            "min_static_words must be >= 1, got {}",
            settings.min_static_words
        )));
    }

    if settings.max_pages_per_site == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages_per_site must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

fn validate_browser_settings(settings: &BrowserSettings) -> Result<(), ConfigError> {
    if settings.render_wait_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "render_wait_secs must be >= 1, got {}",
            settings.render_wait_secs
        )));
    }

    Ok(())
}

/// Validates storage settings
fn validate_storage_settings(settings: &StorageSettings) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&settings.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid storage endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Storage endpoint '{}' must use http or https",
            settings.endpoint
        )));
    }

    if let Some(bucket) = &settings.bucket {
        validate_bucket_name(bucket)?;
    }

    if settings.token_env.is_empty() {
        return Err(ConfigError::Validation(
            "token_env cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Bucket names follow the common object-store rules: 3-63 characters of
/// lowercase alphanumerics, '-', '_' or '.', starting and ending alphanumeric.
fn validate_bucket_name(bucket: &str) -> Result<(), ConfigError> {
    if bucket.len() < 3 || bucket.len() > 63 {
        return Err(ConfigError::Validation(format!(
            "Bucket name '{}' must be 3-63 characters long",
            bucket
        )));
    }

    if !bucket
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
    {
        return Err(ConfigError::Validation(format!(
            "Bucket name '{}' contains invalid characters",
            bucket
        )));
    }

    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !bucket.starts_with(alnum) || !bucket.ends_with(alnum) {
        return Err(ConfigError::Validation(format!(
            "Bucket name '{}' must start and end with a letter or digit",
            bucket
        )));
    }

    Ok(())
}
