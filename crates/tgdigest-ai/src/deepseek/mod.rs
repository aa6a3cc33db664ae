//! DeepSeek summarizer (OpenAI-compatible chat completions)

mod models;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use tgdigest_common::{DigestError, MessageBatch, Result};
use tgdigest_config::SummarizerConfig;

use crate::deepseek::models::{ChatMessage, ChatRequest, ChatResponse};
use crate::{prompts, SummaryOptions, Summarizer};

const API_URL: &str = "https://api.deepseek.com/chat/completions";
const DEFAULT_MODEL: &str = "deepseek-chat";

pub struct DeepSeekSummarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl DeepSeekSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| DigestError::network_with_source("failed to create HTTP client", e))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl Summarizer for DeepSeekSummarizer {
    async fn generate_summary(
        &self,
        batch: &MessageBatch,
        options: &SummaryOptions,
    ) -> Result<String> {
        let (system, user) = prompts::resolve(options, &batch.transcript());

        debug!(
            model = %self.model,
            messages = batch.len(),
            "Requesting DeepSeek summary"
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "DeepSeek API error");
            return Err(DigestError::summarizer(format!("{status}: {body}")));
        }

        let response = response.json::<ChatResponse>().await?;

        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| DigestError::summarizer("empty completion from DeepSeek"))
    }

    fn provider_name(&self) -> &'static str {
        "DeepSeek"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_default_and_override() {
        let mut config = SummarizerConfig {
            api_key: "sk-test".to_string(),
            ..SummarizerConfig::default()
        };

        let summarizer = DeepSeekSummarizer::new(&config).unwrap();
        assert_eq!(summarizer.model, DEFAULT_MODEL);

        config.model = Some("deepseek-reasoner".to_string());
        let summarizer = DeepSeekSummarizer::new(&config).unwrap();
        assert_eq!(summarizer.model, "deepseek-reasoner");
    }
}
