//! Main entry point for the tgdigest bot.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info};

use tgdigest_bot::{tools, BotResult, DigestBot};
use tgdigest_common::logging::{init_logging, LoggingConfig};
use tgdigest_config::{Config, ConfigLoader};

#[derive(Parser)]
#[command(name = "tgdigest", version, about = "Daily Telegram-to-Discord digest bot")]
struct Cli {
    /// Path to a YAML configuration file (otherwise: TGDIGEST_CONFIG_PATH,
    /// ./config.yaml, or environment variables only)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the bot with the daily schedule (default)
    Run,
    /// Execute a single collect-summarize-post cycle and exit
    Once,
    /// List the account's channels and groups with their ids
    Channels,
}

#[tokio::main]
async fn main() -> BotResult<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let logging = LoggingConfig {
        level: config.logging.level.clone(),
        file: config.logging.file.clone().map(PathBuf::from),
        ansi: true,
    };
    let _log_guard = init_logging(&logging)?;

    info!("Starting tgdigest");

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => DigestBot::new(config).start().await,
        Command::Once => DigestBot::new(config).run_once().await,
        Command::Channels => tools::list_channels(&config).await,
    };

    if let Err(e) = &result {
        error!("tgdigest failed: {e}");
    }

    result
}

fn load_config(path: Option<&Path>) -> BotResult<Config> {
    let config = match path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    Ok(config)
}
