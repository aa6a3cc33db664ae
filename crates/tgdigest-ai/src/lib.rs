//! Summarization providers
//!
//! A [`Summarizer`] turns one [`MessageBatch`] into a short text summary.
//! Two providers are supported, selected by configuration: DeepSeek
//! (OpenAI-compatible chat completions) and the Anthropic Messages API.

pub mod anthropic;
pub mod deepseek;
pub mod prompts;

pub use anthropic::AnthropicSummarizer;
pub use deepseek::DeepSeekSummarizer;

use async_trait::async_trait;

use tgdigest_common::{MessageBatch, Result};
use tgdigest_config::{SummarizerConfig, SummaryProvider};

/// Per-call prompt customization, matching the prompt template system in
/// [`prompts`]. The default selects prompts by the batch title.
#[derive(Debug, Clone, Default)]
pub struct SummaryOptions {
    /// Topic or channel name, used for specialized prompt routing
    pub topic_name: Option<String>,
    /// Explicit prompt type, overriding topic-based routing
    pub prompt_type: Option<String>,
    /// Replace the selected system prompt entirely
    pub override_system_prompt: Option<String>,
    /// Replace the selected user prompt template entirely
    pub override_user_prompt: Option<String>,
}

impl SummaryOptions {
    /// Options for a batch with the given title
    pub fn for_topic(topic_name: impl Into<String>) -> Self {
        Self {
            topic_name: Some(topic_name.into()),
            ..Self::default()
        }
    }
}

/// A text-generation backend that condenses a message batch into a summary
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Generate a summary for the batch. The batch is never empty; the
    /// pipeline skips empty batches before calling.
    async fn generate_summary(
        &self,
        batch: &MessageBatch,
        options: &SummaryOptions,
    ) -> Result<String>;

    /// Human-readable provider name, used in the posted footer
    fn provider_name(&self) -> &'static str;
}

/// Instantiate the summarizer selected by the configuration.
pub fn create_summarizer(config: &SummarizerConfig) -> Result<Box<dyn Summarizer>> {
    match config.provider {
        SummaryProvider::Deepseek => Ok(Box::new(DeepSeekSummarizer::new(config)?)),
        SummaryProvider::Anthropic => Ok(Box::new(AnthropicSummarizer::new(config)?)),
    }
}
