//! Extra configuration checks that the derive attributes cannot express

use validator::{Validate, ValidationError, ValidationErrors};

use crate::settings::Config;

/// Run the derived field validation plus cross-field checks.
pub fn validate_config(config: &Config) -> Result<(), ValidationErrors> {
    let mut errors = match config.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if config.telegram.topic_ids.iter().any(|&id| id <= 0) {
        let mut error = ValidationError::new("topic_ids");
        error.message = Some("topic ids must be positive integers".into());
        errors.add("topic_ids", error);
    }

    if config
        .telegram
        .source_channel
        .trim_start_matches('@')
        .is_empty()
        && !config.telegram.source_channel.is_empty()
    {
        let mut error = ValidationError::new("source_channel");
        error.message = Some("source channel must name a channel, not just '@'".into());
        errors.add("source_channel", error);
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
