// src/config.rs
use crate::announce::{build_http_client, Announcer, DiscordAnnouncer, SlackAnnouncer};
use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT, ENV_DISCORD_WEBHOOK, ENV_MESSAGE_TEMPLATE, ENV_SLACK_WEBHOOK,
};
use crate::error::AppError;
use crate::formatting::MessageTemplate;
use crate::pipeline::AnnouncementComposer;
use crate::types::{RenderedAnnouncement, WebhookUrl};
use clap::Parser;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// The message to announce
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Validate and log but don't send anything
    #[arg(long, default_value_t = false)]
    pub dryrun: bool,

    /// Verbose logging, including a per-channel trace
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Per-request timeout in seconds for webhook delivery
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl CommandLineInput {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Validated announcement configuration: where to announce and how to word it.
#[derive(Debug)]
pub struct AnnounceConfig {
    pub discord_webhook: Option<WebhookUrl>,
    pub slack_webhook: Option<WebhookUrl>,
    pub template: MessageTemplate,
}

impl AnnounceConfig {
    /// Reads the `PSA_*` environment variables once and resolves them.
    pub fn from_env() -> Result<Self, AppError> {
        let discord = std::env::var(ENV_DISCORD_WEBHOOK).ok();
        let slack = std::env::var(ENV_SLACK_WEBHOOK).ok();
        let template = std::env::var(ENV_MESSAGE_TEMPLATE).ok();

        Self::from_strings(discord.as_deref(), slack.as_deref(), template.as_deref())
    }

    /// Resolves a configuration from raw strings. Absent or empty values mean
    /// "no channel" or "default template".
    pub fn from_strings(
        discord_webhook: Option<&str>,
        slack_webhook: Option<&str>,
        template: Option<&str>,
    ) -> Result<Self, AppError> {
        let discord_webhook = parse_webhook(discord_webhook)?;
        if discord_webhook.is_some() {
            log::info!("Discord webhook configured");
        }

        let slack_webhook = parse_webhook(slack_webhook)?;
        if slack_webhook.is_some() {
            log::info!("Slack webhook configured");
        }

        let template = MessageTemplate::compile(template)?;

        Ok(Self {
            discord_webhook,
            slack_webhook,
            template,
        })
    }

    /// Builds the configured announcers, Discord first, then Slack.
    pub fn announcers(&self, client: &Client) -> Vec<Arc<dyn Announcer>> {
        let mut announcers: Vec<Arc<dyn Announcer>> = Vec::new();

        if let Some(url) = &self.discord_webhook {
            announcers.push(Arc::new(DiscordAnnouncer::discord(
                url.clone(),
                client.clone(),
            )));
        }

        if let Some(url) = &self.slack_webhook {
            announcers.push(Arc::new(SlackAnnouncer::slack(url.clone(), client.clone())));
        }

        announcers
    }

    /// Renders `message` with the configured template.
    pub fn render(&self, message: &str) -> Result<RenderedAnnouncement, AppError> {
        self.template.render(message)
    }
}

impl AnnouncementComposer for AnnounceConfig {
    fn compose(&self, message: &str) -> Result<RenderedAnnouncement, AppError> {
        self.render(message)
    }
}

/// Resolves a configuration from the three optional inputs.
pub fn configure(
    discord_webhook: Option<&str>,
    slack_webhook: Option<&str>,
    template: Option<&str>,
) -> Result<AnnounceConfig, AppError> {
    AnnounceConfig::from_strings(discord_webhook, slack_webhook, template)
}

/// Builds the announcers for `config` on a fresh client with `timeout`.
pub fn build_announcers(
    config: &AnnounceConfig,
    timeout: Duration,
) -> Result<Vec<Arc<dyn Announcer>>, AppError> {
    let client = build_http_client(timeout)?;
    Ok(config.announcers(&client))
}

fn parse_webhook(raw: Option<&str>) -> Result<Option<WebhookUrl>, AppError> {
    match raw {
        Some(url) if !url.is_empty() => Ok(Some(WebhookUrl::parse(url)?)),
        _ => Ok(None),
    }
}
