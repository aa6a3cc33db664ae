//! Anthropic Messages API summarizer

mod models;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use tgdigest_common::{DigestError, MessageBatch, Result};
use tgdigest_config::SummarizerConfig;

use crate::anthropic::models::{Message, MessagesRequest, MessagesResponse};
use crate::{prompts, SummaryOptions, Summarizer};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

pub struct AnthropicSummarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicSummarizer {
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
impl Summarizer for AnthropicSummarizer {
    async fn generate_summary(
        &self,
        batch: &MessageBatch,
        options: &SummaryOptions,
    ) -> Result<String> {
        let (system, user) = prompts::resolve(options, &batch.transcript());

        debug!(
            model = %self.model,
            messages = batch.len(),
            "Requesting Anthropic summary"
        );

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: Some(system),
            messages: vec![Message {
                role: "user".to_string(),
                content: user,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "Anthropic API error");
            return Err(DigestError::summarizer(format!("{status}: {body}")));
        }

        let response = response.json::<MessagesResponse>().await?;

        if let Some(error) = response.error {
            return Err(DigestError::summarizer(error.message));
        }

        response
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| DigestError::summarizer("empty completion from Anthropic"))
    }

    fn provider_name(&self) -> &'static str {
        "Anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_default_and_override() {
        let mut config = SummarizerConfig {
            api_key: "sk-ant-test".to_string(),
            ..SummarizerConfig::default()
        };

        let summarizer = AnthropicSummarizer::new(&config).unwrap();
        assert_eq!(summarizer.model, DEFAULT_MODEL);

        config.model = Some("claude-3-haiku-20240307".to_string());
        let summarizer = AnthropicSummarizer::new(&config).unwrap();
        assert_eq!(summarizer.model, "claude-3-haiku-20240307");
    }
}
