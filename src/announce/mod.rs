// src/announce/mod.rs
//! Announcers: the ability to deliver one message to one webhook.
//!
//! An announcer binds a destination URL to a [`ChannelEncoder`]. Delivery is
//! a single request with no retry, validated by the shared response
//! validator in [`response`].

pub mod client;
pub mod encoders;
pub mod response;

pub use client::build_http_client;
pub use encoders::{ChannelEncoder, FormEncoder, JsonEncoder, WebhookRequest};
pub use response::{read_bounded, validate, BodyExcerpt, Exchange, ResponseBody};

use crate::error::{DeliveryFailure, FailureCause};
use crate::types::WebhookUrl;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;

/// Result of delivering to one channel.
pub type DeliveryOutcome = Result<(), DeliveryFailure>;

/// The ability to deliver an announcement to one channel.
///
/// The dispatcher depends on this trait only, never on a concrete channel.
#[async_trait]
pub trait Announcer: Send + Sync {
    /// Display name used in logs, e.g. "Discord Announcer".
    fn name(&self) -> &str;

    async fn deliver(&self, message: &str) -> DeliveryOutcome;
}

/// Delivers messages to a webhook using encoder `E`.
pub struct WebhookAnnouncer<E> {
    destination: WebhookUrl,
    encoder: E,
    client: Client,
}

/// Posts form-encoded `content` to a Discord-style webhook.
pub type DiscordAnnouncer = WebhookAnnouncer<FormEncoder>;

/// Posts JSON `text` to a Slack-style webhook.
pub type SlackAnnouncer = WebhookAnnouncer<JsonEncoder>;

impl<E: ChannelEncoder> WebhookAnnouncer<E> {
    pub fn new(destination: WebhookUrl, encoder: E, client: Client) -> Self {
        Self {
            destination,
            encoder,
            client,
        }
    }

    pub fn destination(&self) -> &WebhookUrl {
        &self.destination
    }

    /// Builds the request this announcer would send for `message`.
    pub fn build_request(&self, message: &str) -> Result<WebhookRequest, FailureCause> {
        self.encoder
            .encode(&self.destination, message)
            .map_err(|e| FailureCause::Encoding(e.to_string()))
    }

    async fn send(&self, request: WebhookRequest) -> Result<(), FailureCause> {
        log::debug!(
            "[{}] {} {}",
            self.encoder.channel_name(),
            request.method,
            request.url
        );
        let exchange = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map(Exchange::<ResponseBody>::from);
        validate(exchange).await
    }
}

impl DiscordAnnouncer {
    pub fn discord(destination: WebhookUrl, client: Client) -> Self {
        Self::new(destination, FormEncoder, client)
    }
}

impl SlackAnnouncer {
    pub fn slack(destination: WebhookUrl, client: Client) -> Self {
        Self::new(destination, JsonEncoder, client)
    }
}

#[async_trait]
impl<E: ChannelEncoder> Announcer for WebhookAnnouncer<E> {
    fn name(&self) -> &str {
        self.encoder.channel_name()
    }

    async fn deliver(&self, message: &str) -> DeliveryOutcome {
        let request = self
            .build_request(message)
            .map_err(|cause| DeliveryFailure::new(self.name(), cause))?;
        self.send(request)
            .await
            .map_err(|cause| DeliveryFailure::new(self.name(), cause))
    }
}

impl<E: ChannelEncoder> fmt::Debug for WebhookAnnouncer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookAnnouncer")
            .field("channel", &self.encoder.channel_name())
            .field("destination", &self.destination.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_REQUEST_TIMEOUT;

    fn client() -> Client {
        build_http_client(DEFAULT_REQUEST_TIMEOUT).unwrap()
    }

    #[test]
    fn test_announcer_names() {
        let url = WebhookUrl::parse("http://hook.example.com").unwrap();
        assert_eq!(
            DiscordAnnouncer::discord(url.clone(), client()).name(),
            "Discord Announcer"
        );
        assert_eq!(SlackAnnouncer::slack(url, client()).name(), "Slack Announcer");
    }

    #[test]
    fn test_request_targets_bound_destination() {
        let url = WebhookUrl::parse("https://hooks.example.com/services/T0/B0/x").unwrap();
        let announcer = SlackAnnouncer::slack(url.clone(), client());
        let request = announcer.build_request("hello").unwrap();
        assert_eq!(request.url.as_str(), url.as_str());
        assert_eq!(announcer.destination(), &url);
    }

    #[tokio::test]
    async fn test_unreachable_destination_is_transport_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = WebhookUrl::parse(&format!("http://127.0.0.1:{port}/hook")).unwrap();
        let announcer = DiscordAnnouncer::discord(url, client());
        let failure = announcer.deliver("hello").await.unwrap_err();
        assert_eq!(failure.channel, "Discord Announcer");
        assert!(matches!(failure.cause, FailureCause::Transport(_)), "{failure}");
    }
}
