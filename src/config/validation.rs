use crate::config::types::{Config, HttpConfig, ImagesConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_images_config(&config.images)?;
    Ok(())
}

/// Validates the site section
///
/// The base URL must end with `/`, otherwise joining `index.html` onto it
/// replaces its last path segment instead of appending.
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
        })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if !url.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must end with '/'",
            config.base_url
        )));
    }

    if config.index_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "index-path cannot be empty".to_string(),
        ));
    }

    url.join(&config.index_path).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid index-path '{}': {}", config.index_path, e))
    })?;

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("csv-dir cannot be empty".to_string()));
    }

    if config.images_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "images-dir cannot be empty".to_string(),
        ));
    }

    if let Some(summary) = &config.summary_path {
        if summary.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "summary-path cannot be empty when given".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_images_config(config: &ImagesConfig) -> Result<(), ConfigError> {
    if config.jpeg_quality < 1 || config.jpeg_quality > 100 {
        return Err(ConfigError::Validation(format!(
            "jpeg-quality must be between 1 and 100, got {}",
            config.jpeg_quality
        )));
    }
    Ok(())
}
