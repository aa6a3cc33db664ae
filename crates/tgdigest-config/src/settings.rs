//! Configuration schema for the tgdigest bot
//!
//! All settings are loaded once at startup and are immutable for the process
//! lifetime. See [`crate::loader::ConfigLoader`] for the loading order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Supported summarization providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryProvider {
    /// DeepSeek chat completions (OpenAI-compatible API)
    #[default]
    Deepseek,
    /// Anthropic Messages API
    Anthropic,
}

impl SummaryProvider {
    /// Human-readable provider name, used in the Discord embed footer
    pub fn display_name(&self) -> &'static str {
        match self {
            SummaryProvider::Deepseek => "DeepSeek",
            SummaryProvider::Anthropic => "Anthropic",
        }
    }
}

impl fmt::Display for SummaryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryProvider::Deepseek => write!(f, "deepseek"),
            SummaryProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl FromStr for SummaryProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Ok(SummaryProvider::Deepseek),
            "anthropic" => Ok(SummaryProvider::Anthropic),
            other => Err(format!(
                "unsupported summarization provider '{}' (expected 'deepseek' or 'anthropic')",
                other
            )),
        }
    }
}

/// Telegram source-channel configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TelegramConfig {
    /// Telegram application id (from my.telegram.org)
    #[validate(range(min = 1, message = "TELEGRAM_API_ID is required"))]
    pub api_id: i32,
    /// Telegram application hash
    #[validate(length(min = 1, message = "TELEGRAM_API_HASH is required"))]
    pub api_hash: String,
    /// Phone number of the reading account, international format
    #[validate(length(min = 1, message = "TELEGRAM_PHONE_NUMBER is required"))]
    pub phone_number: String,
    /// Path of the persisted MTProto session file
    #[validate(length(min = 1))]
    pub session_file: String,
    /// Source channel: @username or numeric id (a leading -100 is tolerated)
    #[validate(length(min = 1, message = "TELEGRAM_SOURCE_CHANNEL is required"))]
    pub source_channel: String,
    /// Forum topic ids to collect separately; empty for a plain channel
    pub topic_ids: Vec<i32>,
    /// Whether the main channel itself is collected
    pub include_main_channel: bool,
    /// How many days of history one cycle covers
    #[validate(range(min = 1, max = 30))]
    pub lookback_days: i64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_id: 0,
            api_hash: String::new(),
            phone_number: String::new(),
            session_file: "tgdigest.session".to_string(),
            source_channel: String::new(),
            topic_ids: Vec::new(),
            include_main_channel: true,
            lookback_days: 1,
        }
    }
}

/// Discord destination configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DiscordConfig {
    /// Bot token
    #[validate(length(min = 1, message = "DISCORD_TOKEN is required"))]
    pub token: String,
    /// Channel the summaries are posted into
    #[validate(range(min = 1, message = "DISCORD_DESTINATION_CHANNEL_ID is required"))]
    pub destination_channel_id: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            destination_channel_id: 0,
        }
    }
}

/// Summarization provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Which provider to call
    pub provider: SummaryProvider,
    /// API key for the selected provider
    #[validate(length(min = 1, message = "LLM_API_KEY is required"))]
    pub api_key: String,
    /// Model override; each provider has its own default
    pub model: Option<String>,
    /// Upper bound on generated summary tokens
    #[validate(range(min = 1))]
    pub max_tokens: u32,
    /// HTTP timeout for one summarization request
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: SummaryProvider::default(),
            api_key: String::new(),
            model: None,
            max_tokens: 1000,
            request_timeout_secs: 120,
        }
    }
}

/// Daily schedule configuration. Hour and minute are interpreted in UTC.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScheduleConfig {
    #[validate(range(max = 23))]
    pub hour: u8,
    #[validate(range(max = 59))]
    pub minute: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hour: 23,
            minute: 0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter, e.g. "info" or "tgdigest=debug"
    #[validate(length(min = 1))]
    pub level: String,
    /// Log file path; set to null to log to the console only
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("tgdigest.log".to_string()),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct Config {
    #[validate]
    pub telegram: TelegramConfig,
    #[validate]
    pub discord: DiscordConfig,
    #[validate]
    pub summarizer: SummarizerConfig,
    #[validate]
    pub schedule: ScheduleConfig,
    #[validate]
    pub logging: LoggingSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            "deepseek".parse::<SummaryProvider>().unwrap(),
            SummaryProvider::Deepseek
        );
        assert_eq!(
            "Anthropic".parse::<SummaryProvider>().unwrap(),
            SummaryProvider::Anthropic
        );
        assert!("claude".parse::<SummaryProvider>().is_err());
    }

    #[test]
    fn test_provider_display_round_trip() {
        for provider in [SummaryProvider::Deepseek, SummaryProvider::Anthropic] {
            assert_eq!(
                provider.to_string().parse::<SummaryProvider>().unwrap(),
                provider
            );
        }
    }

    #[test]
    fn test_provider_display_names() {
        assert_eq!(SummaryProvider::Deepseek.display_name(), "DeepSeek");
        assert_eq!(SummaryProvider::Anthropic.display_name(), "Anthropic");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.telegram.session_file, "tgdigest.session");
        assert!(config.telegram.include_main_channel);
        assert_eq!(config.telegram.lookback_days, 1);
        assert_eq!(config.summarizer.provider, SummaryProvider::Deepseek);
        assert_eq!(config.summarizer.max_tokens, 1000);
        assert_eq!(config.schedule.hour, 23);
        assert_eq!(config.schedule.minute, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_fails_validation() {
        // all credentials are empty by default; startup must refuse this
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn test_schedule_bounds() {
        let mut schedule = ScheduleConfig::default();
        assert!(schedule.validate().is_ok());

        schedule.hour = 24;
        assert!(schedule.validate().is_err());

        schedule.hour = 23;
        schedule.minute = 60;
        assert!(schedule.validate().is_err());
    }
}
