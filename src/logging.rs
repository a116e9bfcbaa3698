//! Logging configuration for BIAS

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::Result;

const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "bias.log";

/// Initialize logging system with file output, using `RUST_LOG` when set
pub fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,bias=debug"));
    install(env_filter, "info")
}

/// Initialize logging with configuration; `RUST_LOG` wins when set
pub fn init_logging_with_config(config: &crate::config::AppConfig) -> Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        return init_logging();
    }
    init_logging_with_level(&config.logging.level)
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    let env_filter = EnvFilter::new(format!("{level},bias={level}"));
    install(env_filter, level)
}

fn install(env_filter: EnvFilter, level: &str) -> Result<()> {
    // Create logs directory if it doesn't exist
    let logs_dir = Path::new(LOG_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::BiasError::Custom(format!("Failed to initialize logging: {e}")))?;

    tracing::info!("Logging initialized with level: {level} - console and file output enabled");
    tracing::info!("Log files will be saved to: {LOG_DIR}/{LOG_FILE_PREFIX}.YYYY-MM-DD");

    // The writer must outlive every span; the process owns it until exit
    std::mem::forget(guard);

    Ok(())
}

/// Turn on panic backtraces when `logging.backtrace` is set
///
/// An explicit `RUST_BACKTRACE` in the environment is left alone. Returns
/// whether the variable was set here.
pub fn apply_backtrace_setting(config: &crate::config::AppConfig) -> bool {
    if !config.logging.backtrace || std::env::var_os("RUST_BACKTRACE").is_some() {
        return false;
    }
    std::env::set_var("RUST_BACKTRACE", "1");
    true
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|e| crate::BiasError::Custom(format!("Failed to initialize logging: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtrace_setting() {
        let mut config = crate::config::AppConfig::default();
        assert!(!apply_backtrace_setting(&config));

        config.logging.backtrace = true;
        apply_backtrace_setting(&config);
        assert!(std::env::var_os("RUST_BACKTRACE").is_some());
        // already set, nothing to do
        assert!(!apply_backtrace_setting(&config));
    }

    #[test]
    fn test_logging_initialization() {
        // A second initialization in the same process reports an error instead of panicking
        let _ = init_simple_logging();
        assert!(init_simple_logging().is_err());
    }
}
