// src/announce/encoders.rs
//! Channel encoders: pure functions from message text to a webhook request.
//!
//! No encoder touches the network. Adding a channel means adding an encoder;
//! the announcer and dispatcher stay as they are.

use crate::error::AppError;
use crate::types::WebhookUrl;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::form_urlencoded;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully built webhook request, ready to be sent.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    pub method: Method,
    pub url: url::Url,
    pub headers: HeaderMap,
    pub body: String,
}

impl WebhookRequest {
    fn post(destination: &WebhookUrl, content_type: &'static str, body: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        Self {
            method: Method::POST,
            url: destination.as_url().clone(),
            headers,
            body,
        }
    }

    /// The `Content-Type` header value, if set.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Turns a message into a channel-specific request.
pub trait ChannelEncoder: Send + Sync {
    /// Display name of the announcer using this encoder.
    fn channel_name(&self) -> &'static str;

    fn encode(&self, destination: &WebhookUrl, message: &str) -> Result<WebhookRequest, AppError>;
}

/// Discord-style encoding: a form body with a single `content` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormEncoder;

impl ChannelEncoder for FormEncoder {
    fn channel_name(&self) -> &'static str {
        "Discord Announcer"
    }

    fn encode(&self, destination: &WebhookUrl, message: &str) -> Result<WebhookRequest, AppError> {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("content", message)
            .finish();
        Ok(WebhookRequest::post(destination, FORM_CONTENT_TYPE, body))
    }
}

/// Slack-style encoding: a JSON object with a single `text` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

#[derive(Serialize)]
struct TextPayload<'a> {
    text: &'a str,
}

impl ChannelEncoder for JsonEncoder {
    fn channel_name(&self) -> &'static str {
        "Slack Announcer"
    }

    fn encode(&self, destination: &WebhookUrl, message: &str) -> Result<WebhookRequest, AppError> {
        let body = serde_json::to_string(&TextPayload { text: message })?;
        Ok(WebhookRequest::post(destination, JSON_CONTENT_TYPE, body))
    }
}
