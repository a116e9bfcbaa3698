use bias::cli::handle_analyze_command;
use bias::cli::handle_config_command;
use bias::cli::handle_score_command;
use bias::cli::handle_serve_command;
use bias::cli::profile_from_counts;
use bias::cli::Cli;
use bias::cli::Commands;
use bias::config::AppConfig;
use bias::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    bias::logging::apply_backtrace_setting(&config);

    // Initialize logging
    if cli.verbose {
        bias::logging::init_logging_with_level("debug")?;
    } else {
        bias::logging::init_logging_with_config(&config)?;
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Serve { host, port, cors } => {
            handle_serve_command(&config, host, port, cors).await?;
        }
        Commands::Analyze { username, json } => {
            handle_analyze_command(&config, &username, json).await?;
        }
        Commands::Score {
            followers,
            likes,
            videos,
            following,
            verified,
            bio,
            json,
        } => {
            let profile = profile_from_counts(followers, likes, videos, following, verified, bio);
            handle_score_command(&config, profile, json).await?;
        }
        Commands::Config => {
            handle_config_command(&config);
        }
    }

    Ok(())
}
