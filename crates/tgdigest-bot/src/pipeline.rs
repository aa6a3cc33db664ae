//! The daily digest cycle: collect, summarize, post.
//!
//! The cycle runs against two narrow seams, [`MessageSource`] and
//! [`SummarySink`], so the orchestration can be exercised without a Telegram
//! account or a Discord gateway.

use async_trait::async_trait;
use tracing::info;

use tgdigest_ai::{Summarizer, SummaryOptions};
use tgdigest_common::{ChannelMessage, MessageBatch, Result};
use tgdigest_config::TelegramConfig;

/// Where messages come from. `topic_id` of `None` means the main channel.
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn collect(&self, topic_id: Option<i32>) -> Result<Vec<ChannelMessage>>;
}

/// Where finished summaries go.
#[async_trait]
pub trait SummarySink: Send + Sync {
    async fn post(&self, title: &str, summary: &str, provider_name: &str) -> Result<()>;
}

/// Which parts of the source channel one cycle covers
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub include_main_channel: bool,
    pub topic_ids: Vec<i32>,
}

impl From<&TelegramConfig> for CycleSettings {
    fn from(config: &TelegramConfig) -> Self {
        Self {
            include_main_channel: config.include_main_channel,
            topic_ids: config.topic_ids.clone(),
        }
    }
}

/// Outcome of one cycle, for logging and tests
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub messages_collected: usize,
    pub summaries_posted: usize,
}

/// Run one digest cycle: collect each configured scope, post one summary per
/// non-empty batch, and a combined summary when topics are configured.
///
/// Any error aborts the cycle; the caller logs it and waits for the next
/// scheduled tick.
pub async fn run_cycle(
    source: &dyn MessageSource,
    summarizer: &dyn Summarizer,
    sink: &dyn SummarySink,
    settings: &CycleSettings,
) -> Result<CycleReport> {
    let mut all_messages: Vec<ChannelMessage> = Vec::new();
    let mut report = CycleReport::default();

    if settings.include_main_channel {
        info!("Collecting messages from the main channel");
        let messages = source.collect(None).await?;

        if messages.is_empty() {
            info!("No messages found to summarize for the main channel");
        } else {
            all_messages.extend(messages.clone());
            let batch = MessageBatch::with_messages("Main Channel", messages);
            summarize_and_post(&batch, summarizer, sink).await?;
            report.summaries_posted += 1;
        }
    }

    for &topic_id in &settings.topic_ids {
        info!(topic_id, "Collecting messages from topic");
        let messages = source.collect(Some(topic_id)).await?;

        if messages.is_empty() {
            info!(topic_id, "No messages found to summarize for topic");
        } else {
            all_messages.extend(messages.clone());
            let batch = MessageBatch::with_messages(format!("Topic {topic_id}"), messages);
            summarize_and_post(&batch, summarizer, sink).await?;
            report.summaries_posted += 1;
        }
    }

    // with topics configured, also post one summary over everything collected
    if !settings.topic_ids.is_empty() && !all_messages.is_empty() {
        let batch =
            MessageBatch::with_messages("All Channels and Topics", all_messages.clone());
        summarize_and_post(&batch, summarizer, sink).await?;
        report.summaries_posted += 1;
    }

    report.messages_collected = all_messages.len();

    if all_messages.is_empty() {
        info!("No messages found to summarize in any channel or topic");
    }

    Ok(report)
}

async fn summarize_and_post(
    batch: &MessageBatch,
    summarizer: &dyn Summarizer,
    sink: &dyn SummarySink,
) -> Result<()> {
    let options = SummaryOptions::for_topic(batch.title.as_str());
    let summary = summarizer.generate_summary(batch, &options).await?;

    let title = format!("Telegram Summary: {}", batch.title);
    sink.post(&title, &summary, summarizer.provider_name()).await
}
