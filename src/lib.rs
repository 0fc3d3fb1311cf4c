// src/lib.rs
//! psa library — broadcasts a public service announcement to webhook channels.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`, `DeliveryFailure`, `FailureCause`
//! - **Configuration** — `AnnounceConfig`, `configure`, `CommandLineInput`
//! - **Rendering** — `MessageTemplate`, `render_announcement`, `escape_html`
//! - **Channels** — `Announcer`, `ChannelEncoder`, `DiscordAnnouncer`, `SlackAnnouncer`
//! - **Fan-out** — `Dispatcher`, `DispatchSummary`

pub mod announce;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod formatting;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, DeliveryFailure, FailureCause};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{build_announcers, configure, AnnounceConfig, CommandLineInput};

// --- Domain Types ---
pub use crate::types::{RenderedAnnouncement, WebhookUrl};

// --- Rendering ---
pub use crate::formatting::{escape_html, render_announcement, MessageTemplate};

// --- Channels ---
pub use crate::announce::{
    build_http_client, Announcer, ChannelEncoder, DeliveryOutcome, DiscordAnnouncer,
    FormEncoder, JsonEncoder, SlackAnnouncer, WebhookAnnouncer, WebhookRequest,
};

// --- Fan-out ---
pub use crate::dispatch::{DispatchSummary, Dispatcher, TraceEntry, TraceEvent};

// --- Pipeline Traits ---
pub use crate::pipeline::{AnnouncementComposer, AnnouncementDelivery};
