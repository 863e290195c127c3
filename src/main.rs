use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;
use word_guess_game::config::CliConfig;
use word_guess_game::{GameInterface, GameMode, Config, VERSION};

#[derive(Parser)]
#[command(name = "word-guess")]
#[command(about = "Guess the hidden word one letter at a time")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start a round of this mode (classic or timed) instead of showing the menu
    #[arg(short, long)]
    mode: Option<GameMode>,

    /// Seed for reproducible word selection
    #[arg(long)]
    seed: Option<u64>,

    /// JSON word list to play with
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Color theme
    #[arg(short, long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?,
        None => Config::from_env().context("Failed to load configuration")?,
    };
    config.merge_with_cli(CliConfig {
        mode: cli.mode,
        seed: cli.seed,
        words_file: cli.words.clone(),
        theme: cli.theme.clone(),
        debug: cli.debug,
    });

    // Initialize logging; stdout belongs to the game screen
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(&config.logging.level)))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Word Guess Game v{}", VERSION);

    // Create and start the game interface
    let mut game_interface = GameInterface::new(config).await?;

    if let Some(mode) = cli.mode {
        info!("Starting {} mode directly", mode);
        if let Err(e) = game_interface.play(mode).await {
            error!("Game error: {}", e);
            eprintln!("An error occurred: {}", e);
            std::process::exit(1);
        }
    }

    // Start the menu loop
    if let Err(e) = game_interface.run().await {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Game session ended");
    Ok(())
}

/// Directives for the library crate and this binary; everything else at warn.
fn log_filter(level: &str) -> String {
    format!("word_guess_game={level},word_guess={level},warn", level = level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["word-guess", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(cli.mode.is_none());
    }

    #[test]
    fn test_cli_mode_and_seed() {
        let cli = Cli::try_parse_from(["word-guess", "--mode", "timed", "--seed", "42"]).unwrap();
        assert_eq!(cli.mode, Some(GameMode::Timed));
        assert_eq!(cli.seed, Some(42));

        assert!(Cli::try_parse_from(["word-guess", "--mode", "blitz"]).is_err());
    }

    #[test]
    fn test_log_filter_covers_binary_target() {
        let filter = log_filter("debug");
        assert!(filter.split(',').any(|directive| directive == "word_guess=debug"));
        assert!(filter.split(',').any(|directive| directive == "word_guess_game=debug"));
        assert!(filter.parse::<EnvFilter>().is_ok());
    }
}
