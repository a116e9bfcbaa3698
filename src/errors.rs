use thiserror::Error;

/// Failures of the single best-effort profile scrape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Profile not found: @{0}")]
    NotFound(String),

    #[error("Access denied while fetching @{0}")]
    AccessDenied(String),

    #[error("Rate limited while fetching @{0}")]
    RateLimited(String),

    #[error("Could not extract profile data for @{0}")]
    StructureChanged(String),

    #[error("Unexpected HTTP status {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Error, Debug)]
pub enum BiasError {
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP client error: {0}")]
    HttpError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: &'static str, key: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl BiasError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<csv::Error> for BiasError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BiasError>;
