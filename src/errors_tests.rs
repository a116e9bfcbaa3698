//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::BiasError;
    use crate::errors::ScrapeError;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = BiasError::Custom("Test error message".to_string());
        assert_eq!(format!("{error}"), "Test error message");
    }

    #[test]
    fn test_config_error() {
        let error = BiasError::ConfigError("Invalid configuration".to_string());
        assert!(matches!(error, BiasError::ConfigError(_)));
        assert!(format!("{error}").contains("configuration"));
    }

    #[test]
    fn test_not_found_error() {
        let error = BiasError::not_found("analysis", "abc");
        assert_eq!(format!("{error}"), "analysis not found: abc");
    }

    #[test]
    fn test_scrape_error_messages() {
        assert_eq!(
            ScrapeError::StructureChanged("alice".into()).to_string(),
            "Could not extract profile data for @alice"
        );
        assert_eq!(
            ScrapeError::NotFound("bob".into()).to_string(),
            "Profile not found: @bob"
        );
        assert_eq!(ScrapeError::Http(500).to_string(), "Unexpected HTTP status 500");
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: BiasError = io_err.into();
        assert!(matches!(err, BiasError::Io(_)));
    }

    #[test]
    fn test_error_from_scrape() {
        let err: BiasError = ScrapeError::RateLimited("carol".into()).into();
        assert!(matches!(err, BiasError::Scrape(ScrapeError::RateLimited(_))));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse_result: Result<serde_json::Value, _> = serde_json::from_str("{invalid json}");
        let json_err = parse_result.unwrap_err();
        let err: BiasError = json_err.into();
        assert!(matches!(err, BiasError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: BiasError = toml_err.into();
        assert!(matches!(err, BiasError::TomlParsing(_)));
    }

    // ====== Error Debug/Display Tests ======

    #[test]
    fn test_error_debug_format() {
        let error = BiasError::Custom("Debug test".to_string());
        assert!(format!("{error:?}").contains("Custom"));
    }
}
