//! Message types shared between the Telegram collector and the summarizers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single text message collected from the source channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Display name of the sender (`@username`, profile name, or numeric id)
    pub sender: String,
    /// Message text
    pub text: String,
    /// When the message was sent
    pub date: DateTime<Utc>,
}

impl ChannelMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            date,
        }
    }
}

/// An ordered batch of messages for one summarization cycle.
///
/// Messages are oldest-first. The batch only lives for the duration of a
/// single cycle; nothing is persisted across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBatch {
    /// Label for the batch, e.g. "Main Channel" or a topic name
    pub title: String,
    /// Collected messages, oldest first
    pub messages: Vec<ChannelMessage>,
}

impl MessageBatch {
    /// Create an empty batch with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            messages: Vec::new(),
        }
    }

    /// Create a batch from an already collected message list
    pub fn with_messages(title: impl Into<String>, messages: Vec<ChannelMessage>) -> Self {
        Self {
            title: title.into(),
            messages,
        }
    }

    pub fn push(&mut self, message: ChannelMessage) {
        self.messages.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Render the batch as a plain-text transcript, one `sender: text` line
    /// per message, in collection order. This is the exact text handed to the
    /// summarization provider.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.sender, m.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
