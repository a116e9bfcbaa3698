//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, and validation.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::config::*;

    // ====== Default Value Tests ======

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.scraper.base_url, "https://www.tiktok.com");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.scraper.timeout_secs, 15);
        assert_eq!(config.llm.timeout_secs, 30);
    }

    // ====== Parsing Tests ======

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
[server]
port = 8080

[llm]
provider = "ollama"
endpoint = "http://localhost:11434"
model = "llama3"
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.server.enable_cors);
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "llama3");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[llm]\napi_key = \"sk-test-1234\"\n\n[scraper]\ntimeout_secs = 5"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scraper.timeout_secs, 5);
        assert!(config.llm_enabled());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::from_file("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(crate::BiasError::Io(_))));
    }

    // ====== Validation Tests ======

    #[test]
    fn test_provider_is_not_validated_at_load() {
        // provider names are resolved by the LLM client; unknown ones disable AI insights
        let config = AppConfig::from_toml_str("[llm]\nprovider = \"Ollama\"").unwrap();
        assert_eq!(config.llm.provider, "Ollama");
        assert!(AppConfig::from_toml_str("[llm]\nprovider = \"anthropic\"").is_ok());
    }

    #[test]
    fn test_backtrace_flag_parsed() {
        let config = AppConfig::from_toml_str("[logging]\nbacktrace = true").unwrap();
        assert!(config.logging.backtrace);
        assert!(!AppConfig::default().logging.backtrace);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = AppConfig::from_toml_str("[scraper]\ntimeout_secs = 0");
        assert!(matches!(result, Err(crate::BiasError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = AppConfig::from_toml_str("[scraper]\nbase_url = \"not a url\"");
        assert!(matches!(result, Err(crate::BiasError::ConfigError(_))));
    }

    // ====== LLM Key Tests ======

    #[test]
    fn test_masked_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = "sk-abcdef9876".to_string();
        assert_eq!(config.masked_llm_key(), "****9876");

        config.llm.api_key = String::new();
        assert_eq!(config.masked_llm_key(), "(not set)");
    }

    #[test]
    fn test_llm_enabled_requires_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = "   ".to_string();
        assert!(!config.llm_enabled());
        config.llm.api_key = "key".to_string();
        assert!(config.llm_enabled());
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig::default();
        assert_eq!(config.server_addr(), "127.0.0.1:5000");
    }
}
