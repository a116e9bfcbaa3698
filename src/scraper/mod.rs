//! Public profile scraping

pub mod client;
pub mod extract;

pub use client::ProfileScraper;
pub use extract::extract_profile;
pub use extract::normalize_username;
