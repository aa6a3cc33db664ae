//! Configuration management for the tgdigest bot
//!
//! Settings come from an optional YAML file with environment variable
//! overrides on top; a `.env` file is honored for the environment. The
//! loaded [`Config`] is validated once and never changes afterwards.

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    Config, DiscordConfig, LoggingSettings, ScheduleConfig, SummarizerConfig, SummaryProvider,
    TelegramConfig,
};
