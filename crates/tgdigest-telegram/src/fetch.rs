//! Channel resolution and bounded-window message collection

use chrono::{Duration, Utc};
use grammers_client::types::Chat;
use tracing::{debug, info};

use tgdigest_common::{ChannelMessage, DigestError, Result};

use crate::TelegramCollector;

impl TelegramCollector {
    /// Resolve the configured source channel.
    ///
    /// Accepts a `@username` (or bare username) or a numeric channel id in
    /// any of the formats Telegram tooling produces (`1234`, `-1234`,
    /// `-1001234`). Numeric ids are looked up in the account's dialog list.
    pub async fn resolve_channel(&self, identifier: &str) -> Result<Chat> {
        let trimmed = identifier.trim();

        if let Some(id) = normalize_channel_id(trimmed) {
            return self.find_dialog_by_id(id).await;
        }

        let username = trimmed.trim_start_matches('@');
        match self
            .client
            .resolve_username(username)
            .await
            .map_err(|e| DigestError::telegram_with_source("username resolution failed", e))?
        {
            Some(chat) => {
                debug!(channel = username, id = chat.id(), "Resolved channel");
                Ok(chat)
            }
            None => Err(DigestError::telegram(format!(
                "channel @{username} not found"
            ))),
        }
    }

    async fn find_dialog_by_id(&self, id: i64) -> Result<Chat> {
        let mut dialogs = self.client.iter_dialogs();

        while let Some(dialog) = dialogs
            .next()
            .await
            .map_err(|e| DigestError::telegram_with_source("dialog listing failed", e))?
        {
            if dialog.chat().id() == id {
                return Ok(dialog.chat().clone());
            }
        }

        Err(DigestError::telegram(format!(
            "no dialog with channel id {id}; the account must be a member of the source channel"
        )))
    }

    /// Collect the text messages of the last `lookback_days` days.
    ///
    /// Messages are fetched newest-first and returned oldest-first. Messages
    /// without text are skipped. When `topic_id` is set, only messages in
    /// that forum topic's reply thread are kept.
    pub async fn collect_messages(
        &self,
        chat: &Chat,
        topic_id: Option<i32>,
        lookback_days: i64,
    ) -> Result<Vec<ChannelMessage>> {
        let threshold = Utc::now() - Duration::days(lookback_days);
        let mut collected = Vec::new();

        let mut messages = self.client.iter_messages(chat);

        while let Some(message) = messages
            .next()
            .await
            .map_err(|e| DigestError::telegram_with_source("message fetch failed", e))?
        {
            if message.date() < threshold {
                break;
            }

            if let Some(topic) = topic_id {
                let in_topic =
                    message.reply_to_message_id() == Some(topic) || message.id() == topic;
                if !in_topic {
                    continue;
                }
            }

            let text = message.text();
            if text.is_empty() {
                continue;
            }

            let sender = sender_display_name(message.sender().as_ref());
            collected.push(ChannelMessage::new(sender, text, message.date()));
        }

        collected.reverse();

        info!(
            channel = chat.name(),
            topic = topic_id,
            count = collected.len(),
            "Collected messages"
        );

        Ok(collected)
    }
}

/// Normalize a numeric channel identifier to the bare id used in dialog
/// listings. Returns `None` for non-numeric identifiers (usernames).
pub fn normalize_channel_id(raw: &str) -> Option<i64> {
    let digits = raw
        .strip_prefix("-100")
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

fn sender_display_name(sender: Option<&Chat>) -> String {
    match sender {
        Some(chat) => display_name(chat.username(), chat.name(), chat.id()),
        None => "Unknown".to_string(),
    }
}

/// Pick a display name for a message sender: `@username` when available,
/// then the profile name, then the numeric id.
pub fn display_name(username: Option<&str>, name: &str, id: i64) -> String {
    if let Some(username) = username {
        if !username.is_empty() {
            return format!("@{username}");
        }
    }

    let name = name.trim();
    if !name.is_empty() {
        return name.to_string();
    }

    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_id() {
        assert_eq!(normalize_channel_id("1234567890"), Some(1234567890));
    }

    #[test]
    fn test_normalize_negative_id() {
        assert_eq!(normalize_channel_id("-1234567890"), Some(1234567890));
    }

    #[test]
    fn test_normalize_marker_prefix() {
        assert_eq!(normalize_channel_id("-1001234567890"), Some(1234567890));
    }

    #[test]
    fn test_normalize_rejects_usernames() {
        assert_eq!(normalize_channel_id("@rustnews"), None);
        assert_eq!(normalize_channel_id("rustnews"), None);
        assert_eq!(normalize_channel_id("-100"), None);
        assert_eq!(normalize_channel_id(""), None);
        assert_eq!(normalize_channel_id("12a34"), None);
    }

    #[test]
    fn test_display_name_prefers_username() {
        assert_eq!(display_name(Some("alice"), "Alice Liddell", 42), "@alice");
    }

    #[test]
    fn test_display_name_falls_back_to_profile_name() {
        assert_eq!(display_name(None, "Alice Liddell", 42), "Alice Liddell");
        assert_eq!(display_name(Some(""), "  Bob  ", 42), "Bob");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(display_name(None, "", 42), "42");
        assert_eq!(display_name(None, "   ", 42), "42");
    }
}
