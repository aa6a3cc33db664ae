//! Operator tooling: channel discovery for initial setup

use tgdigest_config::Config;
use tgdigest_telegram::TelegramCollector;

use crate::error::BotResult;

/// Print the channels and groups the account is a member of, with the ids
/// accepted by `TELEGRAM_SOURCE_CHANNEL`.
pub async fn list_channels(config: &Config) -> BotResult<()> {
    let collector = TelegramCollector::connect(&config.telegram).await?;
    collector.ensure_authorized().await?;

    let dialogs = collector.list_dialogs().await?;

    println!("=== CHANNELS AND GROUPS ===");
    println!("{:<16} | {:<8} | Name", "ID", "Type");
    println!("{}", "-".repeat(50));

    for dialog in dialogs.iter().filter(|d| d.kind != "User") {
        println!("{:<16} | {:<8} | {}", dialog.id, dialog.kind, dialog.title);
    }

    println!();
    println!("Set TELEGRAM_SOURCE_CHANNEL to one of the ids above (or to the");
    println!("channel's @username) and restart the bot.");

    Ok(())
}
