//! Application-wide error types using thiserror.

use tgdigest_common::DigestError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Error from one of the tgdigest crates.
    #[error(transparent)]
    Digest(#[from] DigestError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// Scheduler error.
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
