//! Daily Telegram-to-Discord digest bot
//!
//! On a configurable daily schedule: collect the prior day's messages from
//! the source Telegram channel, summarize them with the configured provider,
//! and post the summary to the destination Discord channel.

pub mod bot;
pub mod discord;
pub mod error;
pub mod pipeline;
pub mod scheduler;
pub mod tools;

pub use bot::DigestBot;
pub use error::{BotError, BotResult};
