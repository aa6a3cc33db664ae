//! Telegram source-channel client
//!
//! Wraps a grammers MTProto user client: session persistence, interactive
//! sign-in, channel resolution and bounded-window message collection. All
//! access is read-only.

mod auth;
mod fetch;

pub use fetch::{display_name, normalize_channel_id};

use grammers_client::session::Session;
use grammers_client::types::Chat;
use grammers_client::{Client, Config as ClientConfig, InitParams};
use tracing::info;

use tgdigest_common::{DigestError, Result};
use tgdigest_config::TelegramConfig;

/// One entry from the account's dialog list, for operator tooling
#[derive(Debug, Clone)]
pub struct DialogInfo {
    pub id: i64,
    pub kind: &'static str,
    pub title: String,
}

/// Read-only client for the source channel
#[derive(Clone)]
pub struct TelegramCollector {
    client: Client,
    session_file: String,
    phone_number: String,
}

impl TelegramCollector {
    /// Connect to Telegram, creating or reusing the configured session file.
    ///
    /// The returned collector may still be unauthorized; call
    /// [`TelegramCollector::ensure_authorized`] before fetching.
    pub async fn connect(config: &TelegramConfig) -> Result<Self> {
        let session = Session::load_file_or_create(&config.session_file)?;

        let client = Client::connect(ClientConfig {
            session,
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| DigestError::telegram_with_source("failed to connect to Telegram", e))?;

        info!("Telegram client connected");

        Ok(Self {
            client,
            session_file: config.session_file.clone(),
            phone_number: config.phone_number.clone(),
        })
    }

    /// List all dialogs (chats, groups, channels) the account is a member of.
    pub async fn list_dialogs(&self) -> Result<Vec<DialogInfo>> {
        let mut dialogs = self.client.iter_dialogs();
        let mut infos = Vec::new();

        while let Some(dialog) = dialogs
            .next()
            .await
            .map_err(|e| DigestError::telegram_with_source("failed to list dialogs", e))?
        {
            let chat = dialog.chat();
            let kind = match chat {
                Chat::User(_) => "User",
                Chat::Group(_) => "Group",
                Chat::Channel(_) => "Channel",
            };
            infos.push(DialogInfo {
                id: chat.id(),
                kind,
                title: chat.name().to_string(),
            });
        }

        Ok(infos)
    }
}
