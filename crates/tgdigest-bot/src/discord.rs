//! Discord posting: token validation and summary embeds

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::http::Http;
use serenity::model::id::ChannelId;
use tracing::{debug, info, warn};

use tgdigest_common::utils::split_text;
use tgdigest_common::{DigestError, Result};

use crate::pipeline::SummarySink;

/// Embed accent color used for every summary post
pub const EMBED_COLOUR: u32 = 0x3498DB;

/// Discord's embed description limit; longer summaries span several embeds
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Posts summaries into the destination channel over the Discord HTTP API
pub struct DiscordPoster {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordPoster {
    pub fn new(http: Arc<Http>, channel_id: u64) -> Self {
        Self {
            http,
            channel_id: ChannelId::new(channel_id),
        }
    }

    /// Post one summary as an embed, splitting the description when it
    /// exceeds the Discord limit.
    pub async fn post_summary(
        &self,
        title: &str,
        summary: &str,
        provider_name: &str,
    ) -> Result<()> {
        let date = Utc::now().format("%Y-%m-%d");
        let parts = split_text(summary, EMBED_DESCRIPTION_LIMIT);
        let total = parts.len();

        for (index, part) in parts.iter().enumerate() {
            let embed_title = if total == 1 {
                format!("{title} ({date})")
            } else {
                format!("{title} ({date}) [{}/{}]", index + 1, total)
            };

            let embed = CreateEmbed::new()
                .title(embed_title)
                .description(part.as_str())
                .colour(EMBED_COLOUR)
                .footer(CreateEmbedFooter::new(format!(
                    "Summary by {provider_name}"
                )));

            self.channel_id
                .send_message(&self.http, CreateMessage::new().embed(embed))
                .await
                .map_err(|e| DigestError::discord_with_source("failed to post summary", e))?;

            debug!(part = index + 1, total, "Posted summary embed");
        }

        info!(%title, channel_id = %self.channel_id, "Posted summary to Discord");
        Ok(())
    }
}

#[async_trait]
impl SummarySink for DiscordPoster {
    async fn post(&self, title: &str, summary: &str, provider_name: &str) -> Result<()> {
        self.post_summary(title, summary, provider_name).await
    }
}

/// Validate the Discord bot token format before attempting a connection.
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(DigestError::validation_field(
            "Discord token cannot be empty",
            "token",
        ));
    }

    // bot tokens are dot-separated and well over 50 characters
    if token.len() < 50 {
        return Err(DigestError::validation_field(
            "Discord token appears to be too short (minimum 50 characters expected)",
            "token",
        ));
    }

    if !token.contains('.') {
        warn!("Discord token format may be invalid (missing dots)");
    }

    Ok(())
}
