//! Bot wiring: Telegram collector, summarizer, Discord client, schedule.
//!
//! The daily job is registered only after the Discord `ready` event, so the
//! first post never races the gateway connection.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::client::{Client, Context, EventHandler};
use serenity::http::Http;
use serenity::model::gateway::{GatewayIntents, Ready};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use tgdigest_ai::{create_summarizer, Summarizer};
use tgdigest_common::{ChannelMessage, Result};
use tgdigest_config::{Config, TelegramConfig};
use tgdigest_telegram::TelegramCollector;

use crate::discord::{validate_token, DiscordPoster};
use crate::error::BotResult;
use crate::pipeline::{self, CycleSettings, MessageSource};
use crate::scheduler::{daily_cron_expression, SchedulerService};

/// Message source backed by the configured Telegram channel
pub struct ChannelSource {
    collector: TelegramCollector,
    channel: String,
    lookback_days: i64,
}

impl ChannelSource {
    pub fn new(collector: TelegramCollector, config: &TelegramConfig) -> Self {
        Self {
            collector,
            channel: config.source_channel.clone(),
            lookback_days: config.lookback_days,
        }
    }
}

#[async_trait]
impl MessageSource for ChannelSource {
    async fn collect(&self, topic_id: Option<i32>) -> Result<Vec<ChannelMessage>> {
        let chat = self.collector.resolve_channel(&self.channel).await?;
        self.collector
            .collect_messages(&chat, topic_id, self.lookback_days)
            .await
    }
}

/// Main bot structure.
pub struct DigestBot {
    config: Arc<Config>,
}

impl DigestBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Starts the bot: Telegram sign-in, Discord gateway, daily schedule.
    pub async fn start(&self) -> BotResult<()> {
        validate_token(&self.config.discord.token)?;

        let collector = TelegramCollector::connect(&self.config.telegram).await?;
        collector.ensure_authorized().await?;

        let summarizer: Arc<dyn Summarizer> =
            Arc::from(create_summarizer(&self.config.summarizer)?);
        info!(
            provider = summarizer.provider_name(),
            "Summarization provider ready"
        );

        let handler = ReadyHandler {
            config: self.config.clone(),
            collector,
            summarizer,
            scheduler: Mutex::new(None),
        };

        let mut client = Client::builder(
            &self.config.discord.token,
            GatewayIntents::non_privileged(),
        )
        .event_handler(handler)
        .await?;

        client.start().await?;
        Ok(())
    }

    /// Executes a single collect-summarize-post cycle and returns.
    ///
    /// Posts over the Discord HTTP API only; no gateway connection is made.
    pub async fn run_once(&self) -> BotResult<()> {
        validate_token(&self.config.discord.token)?;

        let collector = TelegramCollector::connect(&self.config.telegram).await?;
        collector.ensure_authorized().await?;

        let summarizer = create_summarizer(&self.config.summarizer)?;

        let http = Arc::new(Http::new(&self.config.discord.token));
        let source = ChannelSource::new(collector, &self.config.telegram);
        let sink = DiscordPoster::new(http, self.config.discord.destination_channel_id);
        let settings = CycleSettings::from(&self.config.telegram);

        let report = pipeline::run_cycle(&source, summarizer.as_ref(), &sink, &settings).await?;
        info!(
            messages = report.messages_collected,
            summaries = report.summaries_posted,
            "Digest cycle finished"
        );

        Ok(())
    }
}

/// Serenity event handler that installs the daily schedule once the gateway
/// is ready.
struct ReadyHandler {
    config: Arc<Config>,
    collector: TelegramCollector,
    summarizer: Arc<dyn Summarizer>,
    scheduler: Mutex<Option<SchedulerService>>,
}

#[async_trait]
impl EventHandler for ReadyHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Discord client logged in as {}", ready.user.name);

        let mut slot = self.scheduler.lock().await;
        if slot.is_some() {
            debug!("Schedule already installed, ignoring gateway reconnect");
            return;
        }

        match self.install_schedule(&ctx).await {
            Ok(service) => *slot = Some(service),
            Err(e) => error!("Failed to install the daily schedule: {e}"),
        }
    }
}

impl ReadyHandler {
    async fn install_schedule(&self, ctx: &Context) -> BotResult<SchedulerService> {
        let scheduler = SchedulerService::new().await?;
        let cron = daily_cron_expression(self.config.schedule.hour, self.config.schedule.minute);

        let config = self.config.clone();
        let collector = self.collector.clone();
        let summarizer = self.summarizer.clone();
        let http = ctx.http.clone();

        scheduler
            .add_job("daily-digest".to_string(), cron.clone(), move || {
                let config = config.clone();
                let collector = collector.clone();
                let summarizer = summarizer.clone();
                let http = http.clone();

                async move {
                    let source = ChannelSource::new(collector, &config.telegram);
                    let sink =
                        DiscordPoster::new(http, config.discord.destination_channel_id);
                    let settings = CycleSettings::from(&config.telegram);

                    match pipeline::run_cycle(
                        &source,
                        summarizer.as_ref(),
                        &sink,
                        &settings,
                    )
                    .await
                    {
                        Ok(report) => info!(
                            messages = report.messages_collected,
                            summaries = report.summaries_posted,
                            "Daily digest cycle finished"
                        ),
                        Err(e) => error!("Daily digest cycle failed: {e}"),
                    }
                }
            })
            .await?;

        scheduler.start().await?;

        info!(
            hour = self.config.schedule.hour,
            minute = self.config.schedule.minute,
            %cron,
            "Scheduled daily summary (UTC)"
        );

        Ok(scheduler)
    }
}
