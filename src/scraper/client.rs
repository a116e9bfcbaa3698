//! HTTP fetch of a public profile page

use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::extract::extract_profile;
use super::extract::normalize_username;
use crate::config::AppConfig;
use crate::errors::BiasError;
use crate::errors::Result;
use crate::errors::ScrapeError;
use crate::models::Profile;

/// One best-effort GET per request; no retries
pub struct ProfileScraper {
    client: Client,
    base_url: String,
}

impl ProfileScraper {
    /// Create a scraper from application configuration
    ///
    /// # Errors
    /// - HTTP client build errors
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_base_url(
            &config.scraper.base_url,
            &config.scraper.user_agent,
            Duration::from_secs(config.scraper.timeout_secs),
        )
    }

    pub fn with_base_url(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| BiasError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/@{}", self.base_url, username)
    }

    /// Fetch and parse a profile page
    ///
    /// # Errors
    /// - `InvalidUsername` before any request is made
    /// - `NotFound` / `AccessDenied` / `RateLimited` / `Http` by status code
    /// - `Network` on transport failure or timeout
    /// - `StructureChanged` when no counters can be extracted
    pub async fn fetch_profile(&self, username: &str) -> std::result::Result<Profile, ScrapeError> {
        let username = normalize_username(username)?;
        let url = self.profile_url(&username);
        debug!("Fetching profile page: {}", url);

        let response = self
            .client
            .get(&url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                warn!("Request for @{} failed: {}", username, e);
                ScrapeError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Profile page for @{} returned {}", username, status);
            return Err(match status {
                StatusCode::NOT_FOUND => ScrapeError::NotFound(username),
                StatusCode::FORBIDDEN => ScrapeError::AccessDenied(username),
                StatusCode::TOO_MANY_REQUESTS => ScrapeError::RateLimited(username),
                other => ScrapeError::Http(other.as_u16()),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let profile = extract_profile(&username, &html)?;
        info!(
            "Scraped @{}: {} followers, {} likes, {} videos",
            profile.username, profile.followers, profile.likes, profile.videos
        );
        Ok(profile)
    }
}
