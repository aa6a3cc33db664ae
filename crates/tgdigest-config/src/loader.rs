//! Configuration loading utilities
//!
//! Loading order: `.env` file (if present) into the process environment, then
//! an optional YAML file (`TGDIGEST_CONFIG_PATH`, `config.yaml`, `config.yml`),
//! then environment variable overrides, then validation. Any failure aborts
//! startup.

use std::env;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use tgdigest_common::{DigestError, Result as DigestResult};

use crate::settings::{Config, SummaryProvider};
use crate::validation::validate_config;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for DigestError {
    fn from(err: ConfigError) -> Self {
        DigestError::config_with_source("failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// A `.env` file in the working directory is read into the environment
    /// first, so a plain env-file deployment needs no YAML file at all.
    pub fn load() -> DigestResult<Config> {
        if dotenvy::dotenv().is_ok() {
            debug!("Loaded environment from .env file");
        }

        let config = if let Ok(config_path) = env::var("TGDIGEST_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DigestResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        // Telegram configuration overrides
        if let Ok(api_id) = env::var("TELEGRAM_API_ID") {
            config.telegram.api_id = parse_env("TELEGRAM_API_ID", &api_id)?;
        }

        if let Ok(api_hash) = env::var("TELEGRAM_API_HASH") {
            config.telegram.api_hash = api_hash;
        }

        if let Ok(phone) = env::var("TELEGRAM_PHONE_NUMBER") {
            config.telegram.phone_number = phone;
        }

        if let Ok(session_file) = env::var("TELEGRAM_SESSION_FILE") {
            config.telegram.session_file = session_file;
        }

        if let Ok(channel) = env::var("TELEGRAM_SOURCE_CHANNEL") {
            config.telegram.source_channel = channel;
        }

        if let Ok(topic_ids) = env::var("TELEGRAM_TOPIC_IDS") {
            config.telegram.topic_ids = topic_ids
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_env("TELEGRAM_TOPIC_IDS", s))
                .collect::<Result<Vec<i32>, _>>()?;
        }

        if let Ok(include_main) = env::var("INCLUDE_MAIN_CHANNEL") {
            config.telegram.include_main_channel =
                parse_env("INCLUDE_MAIN_CHANNEL", &include_main.to_lowercase())?;
        }

        if let Ok(days) = env::var("LOOKBACK_DAYS") {
            config.telegram.lookback_days = parse_env("LOOKBACK_DAYS", &days)?;
        }

        // Discord configuration overrides
        if let Ok(token) = env::var("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Ok(channel_id) = env::var("DISCORD_DESTINATION_CHANNEL_ID") {
            config.discord.destination_channel_id =
                parse_env("DISCORD_DESTINATION_CHANNEL_ID", &channel_id)?;
        }

        // Summarizer configuration overrides
        if let Ok(provider) = env::var("LLM_PROVIDER") {
            config.summarizer.provider = SummaryProvider::from_str(&provider).map_err(|msg| {
                ConfigError::EnvParse {
                    var: "LLM_PROVIDER".to_string(),
                    source: msg.into(),
                }
            })?;
        }

        if let Ok(api_key) = env::var("LLM_API_KEY") {
            config.summarizer.api_key = api_key;
        }

        if let Ok(model) = env::var("LLM_MODEL") {
            config.summarizer.model = Some(model);
        }

        if let Ok(max_tokens) = env::var("LLM_MAX_TOKENS") {
            config.summarizer.max_tokens = parse_env("LLM_MAX_TOKENS", &max_tokens)?;
        }

        if let Ok(timeout) = env::var("LLM_TIMEOUT_SECS") {
            config.summarizer.request_timeout_secs = parse_env("LLM_TIMEOUT_SECS", &timeout)?;
        }

        // Schedule configuration overrides
        if let Ok(hour) = env::var("SUMMARY_HOUR") {
            config.schedule.hour = parse_env("SUMMARY_HOUR", &hour)?;
        }

        if let Ok(minute) = env::var("SUMMARY_MINUTE") {
            config.schedule.minute = parse_env("SUMMARY_MINUTE", &minute)?;
        }

        // Logging configuration overrides
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("LOG_FILE") {
            config.logging.file = if file.is_empty() { None } else { Some(file) };
        }

        Ok(())
    }
}

/// Parse one environment value, tagging errors with the variable name
fn parse_env<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().map_err(|e| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // env-var manipulation must not interleave across tests
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: &[&str] = &[
        "TGDIGEST_CONFIG_PATH",
        "TELEGRAM_API_ID",
        "TELEGRAM_API_HASH",
        "TELEGRAM_PHONE_NUMBER",
        "TELEGRAM_SESSION_FILE",
        "TELEGRAM_SOURCE_CHANNEL",
        "TELEGRAM_TOPIC_IDS",
        "INCLUDE_MAIN_CHANNEL",
        "LOOKBACK_DAYS",
        "DISCORD_TOKEN",
        "DISCORD_DESTINATION_CHANNEL_ID",
        "LLM_PROVIDER",
        "LLM_API_KEY",
        "LLM_MODEL",
        "LLM_MAX_TOKENS",
        "LLM_TIMEOUT_SECS",
        "SUMMARY_HOUR",
        "SUMMARY_MINUTE",
        "LOG_LEVEL",
        "LOG_FILE",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    const VALID_YAML: &str = r#"
telegram:
  api_id: 12345
  api_hash: "0123456789abcdef0123456789abcdef"
  phone_number: "+15551234567"
  source_channel: "@rustnews"
  topic_ids: [7, 42]
discord:
  token: "MTIzNDU2Nzg5MDEyMzQ1Njc4OTA.AbCdEf.GhIjKlMnOpQrStUvWxYz123456"
  destination_channel_id: 987654321
summarizer:
  provider: anthropic
  api_key: "sk-ant-test"
schedule:
  hour: 8
  minute: 30
"#;

    #[test]
    fn test_load_valid_yaml_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let temp_file = create_test_config_file(VALID_YAML);
        let config = ConfigLoader::load_config(temp_file.path()).expect("Failed to load config");

        assert_eq!(config.telegram.api_id, 12345);
        assert_eq!(config.telegram.source_channel, "@rustnews");
        assert_eq!(config.telegram.topic_ids, vec![7, 42]);
        assert_eq!(config.discord.destination_channel_id, 987654321);
        assert_eq!(config.summarizer.provider, SummaryProvider::Anthropic);
        assert_eq!(config.schedule.hour, 8);
        assert_eq!(config.schedule.minute, 30);

        // unspecified values fall back to defaults
        assert!(config.telegram.include_main_channel);
        assert_eq!(config.summarizer.max_tokens, 1000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_yaml() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let invalid_yaml = "telegram:\n  api_id: [unclosed array";
        let temp_file = create_test_config_file(invalid_yaml);
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_required_value_fails_validation() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        // no discord token anywhere
        let yaml = r#"
telegram:
  api_id: 12345
  api_hash: "0123456789abcdef0123456789abcdef"
  phone_number: "+15551234567"
  source_channel: "@rustnews"
discord:
  destination_channel_id: 987654321
summarizer:
  api_key: "sk-test"
"#;
        let temp_file = create_test_config_file(yaml);
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_environment_variable_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("TELEGRAM_SOURCE_CHANNEL", "-1001234567890");
        env::set_var("TELEGRAM_TOPIC_IDS", "1, 2,3");
        env::set_var("LLM_PROVIDER", "deepseek");
        env::set_var("SUMMARY_HOUR", "6");
        env::set_var("LOG_LEVEL", "debug");

        let temp_file = create_test_config_file(VALID_YAML);
        let config = ConfigLoader::load_config(temp_file.path()).expect("Failed to load config");

        assert_eq!(config.telegram.source_channel, "-1001234567890");
        assert_eq!(config.telegram.topic_ids, vec![1, 2, 3]);
        assert_eq!(config.summarizer.provider, SummaryProvider::Deepseek);
        assert_eq!(config.schedule.hour, 6);
        assert_eq!(config.logging.level, "debug");

        // values without overrides keep the file values
        assert_eq!(config.telegram.api_id, 12345);

        clear_env();
    }

    #[test]
    fn test_env_parse_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("SUMMARY_HOUR", "not_a_number");

        let temp_file = create_test_config_file(VALID_YAML);
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(matches!(result.unwrap_err(), ConfigError::EnvParse { .. }));

        clear_env();
    }

    #[test]
    fn test_unknown_provider_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("LLM_PROVIDER", "claude");

        let temp_file = create_test_config_file(VALID_YAML);
        let result = ConfigLoader::load_config(temp_file.path());

        match result.unwrap_err() {
            ConfigError::EnvParse { var, .. } => assert_eq!(var, "LLM_PROVIDER"),
            other => panic!("expected EnvParse error, got {other:?}"),
        }

        clear_env();
    }

    #[test]
    fn test_missing_config_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let result = ConfigLoader::load_config("/nonexistent/path/config.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_env_only() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("TELEGRAM_API_ID", "12345");
        env::set_var("TELEGRAM_API_HASH", "0123456789abcdef0123456789abcdef");
        env::set_var("TELEGRAM_PHONE_NUMBER", "+15551234567");
        env::set_var("TELEGRAM_SOURCE_CHANNEL", "@rustnews");
        env::set_var(
            "DISCORD_TOKEN",
            "MTIzNDU2Nzg5MDEyMzQ1Njc4OTA.AbCdEf.GhIjKlMnOpQrStUvWxYz123456",
        );
        env::set_var("DISCORD_DESTINATION_CHANNEL_ID", "987654321");
        env::set_var("LLM_PROVIDER", "anthropic");
        env::set_var("LLM_API_KEY", "sk-ant-test");

        let mut config = Config::default();
        ConfigLoader::apply_env_overrides(&mut config).expect("overrides failed");
        validate_config(&config).expect("env-only config should validate");

        assert_eq!(config.summarizer.provider, SummaryProvider::Anthropic);
        assert_eq!(config.discord.destination_channel_id, 987654321);

        clear_env();
    }

    #[test]
    fn test_missing_env_prevents_startup() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        // nothing configured at all
        let mut config = Config::default();
        ConfigLoader::apply_env_overrides(&mut config).expect("no overrides to apply");
        assert!(validate_config(&config).is_err());
    }
}
