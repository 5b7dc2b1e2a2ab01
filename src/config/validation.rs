use crate::config::types::{Config, DatabaseConfig, FetcherConfig, ServerConfig, SpiderConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_spider_config(&config.spider)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_database_config(&config.database)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates the seed and crawl shape
fn validate_spider_config(config: &SpiderConfig) -> Result<(), ConfigError> {
    if config.host.trim().is_empty() {
        return Err(ConfigError::Validation(
            "spider.host cannot be empty".to_string(),
        ));
    }

    validate_port(&config.port)?;

    if !config.target.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "spider.target must start with '/', got '{}'",
            config.target
        )));
    }

    if config.max_depth < 1 {
        return Err(ConfigError::Validation(format!(
            "max-depth must be >= 1, got {}",
            config.max_depth
        )));
    }

    Ok(())
}

fn validate_port(port: &str) -> Result<(), ConfigError> {
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "spider.port must be a number between 1 and 65535, got '{}'",
            port
        ))),
    }
}

/// Validates HTTP client settings
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_redirects < 1 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be >= 1, got {}",
            config.max_redirects
        )));
    }

    if config.connect_timeout_secs == 0 || config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetcher timeouts must be at least one second".to_string(),
        ));
    }

    for pattern in &config.blacklisted_hosts {
        validate_host_pattern(pattern)?;
    }

    Ok(())
}

/// Validates a host pattern (supports wildcards)
fn validate_host_pattern(pattern: &str) -> Result<(), ConfigError> {
    let host = pattern.strip_prefix("*.").unwrap_or(pattern);

    if host.is_empty() {
        return Err(ConfigError::InvalidPattern(format!(
            "Host pattern '{}' has no host",
            pattern
        )));
    }

    if !host
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Host pattern '{}' contains invalid characters",
            pattern
        )));
    }

    if host.starts_with('.') || host.ends_with('.') || host.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Host pattern '{}' has misplaced dots",
            pattern
        )));
    }

    Ok(())
}

fn validate_database_config(config: &DatabaseConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "database.path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.max_query_words < 1 {
        return Err(ConfigError::Validation(format!(
            "max-query-words must be >= 1, got {}",
            config.max_query_words
        )));
    }

    let valid_bind = config
        .bind
        .rsplit_once(':')
        .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
        .unwrap_or(false);

    if !valid_bind {
        return Err(ConfigError::InvalidAddress(format!(
            "server.bind must be host:port, got '{}'",
            config.bind
        )));
    }

    Ok(())
}
