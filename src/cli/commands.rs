//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "bias")]
#[command(about = "BIAS - behavioral insight analytics for TikTok creator profiles")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: configured level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a TOML config file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default: server.host from config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (default: server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS regardless of server.enable_cors
        #[arg(long)]
        cors: bool,
    },
    /// Scrape a public profile, score it and print the analysis
    Analyze {
        /// Username, with or without the leading @
        username: String,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score profile counters offline, without scraping
    Score {
        #[arg(long)]
        followers: u64,
        #[arg(long)]
        likes: u64,
        #[arg(long)]
        videos: u64,
        #[arg(long)]
        following: Option<u64>,
        #[arg(long)]
        verified: bool,
        /// Bio text (its presence affects linguistic and contextual scores)
        #[arg(long)]
        bio: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration (API key masked)
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_command() {
        let cli = Cli::parse_from([
            "bias",
            "-v",
            "score",
            "--followers",
            "1000",
            "--likes",
            "5000",
            "--videos",
            "12",
            "--verified",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Score {
                followers,
                following,
                verified,
                json,
                ..
            } => {
                assert_eq!(followers, 1000);
                assert_eq!(following, None);
                assert!(verified);
                assert!(!json);
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["bias", "serve", "--port", "8080", "-c", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Commands::Serve {
                host: None,
                port: Some(8080),
                cors: false
            }
        ));
    }

    #[test]
    fn test_rejects_negative_counts() {
        assert!(Cli::try_parse_from([
            "bias", "score", "--followers", "-1", "--likes", "0", "--videos", "0"
        ])
        .is_err());
    }
}
