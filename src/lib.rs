pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod llm;
pub mod logging;
pub mod models;
pub mod scraper;
pub mod simulation;
pub mod store;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod errors_tests;
#[cfg(test)]
mod models_tests;

pub use config::AppConfig;
pub use errors::*;
