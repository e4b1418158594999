use super::{Config, ConfigError};

/// Validate a loaded configuration.
///
/// Catches the mistakes that would otherwise surface as confusing runtime
/// failures: malformed base URLs, zero timeouts, a zero concurrency limit.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = &config.index.base_url;
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "index.base_url must be an http(s) URL, got '{}'",
            base_url
        )));
    }

    if config.index.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "index.timeout_secs must be greater than zero".to_string(),
        ));
    }

    if config.resolver.max_parallel_fetches == 0 {
        return Err(ConfigError::ValidationError(
            "resolver.max_parallel_fetches must be greater than zero".to_string(),
        ));
    }

    if config.resolver.fetch_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "resolver.fetch_timeout_secs must be greater than zero".to_string(),
        ));
    }

    if let Some(tmdb) = &config.titles.tmdb {
        if tmdb.api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "titles.tmdb.api_key must not be empty when the section is present".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::load_config_from_str;
    use super::*;

    fn valid_config() -> Config {
        load_config_from_str(
            r#"
[index]
base_url = "https://index.example"
uid = "u1"
pass = "p1"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = valid_config();
        config.index.base_url = "ftp://index.example".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = valid_config();
        config.index.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config = valid_config();
        config.resolver.max_parallel_fetches = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_tmdb_key() {
        let mut config = valid_config();
        config.titles.tmdb = Some(crate::titles::TmdbConfig {
            api_key: String::new(),
            base_url: None,
        });
        assert!(validate_config(&config).is_err());
    }
}
