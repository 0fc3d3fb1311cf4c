// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Configuration sources
// ---------------------------------------------------------------------------

/// Environment variable holding the Discord-style webhook URL.
pub const ENV_DISCORD_WEBHOOK: &str = "PSA_DISCORD_WEBHOOK";

/// Environment variable holding the Slack-style (JSON) webhook URL.
pub const ENV_SLACK_WEBHOOK: &str = "PSA_SLACK_WEBHOOK";

/// Environment variable holding the message template source.
pub const ENV_MESSAGE_TEMPLATE: &str = "PSA_MSG_TEMPLATE";

// ---------------------------------------------------------------------------
// Message rendering
// ---------------------------------------------------------------------------

/// Name of the single field a message template may reference.
pub const MESSAGE_FIELD: &str = "message";

/// Template used when none is configured.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "📣 {{message}}";

/// Name the compiled template is registered under.
pub const ANNOUNCEMENT_TEMPLATE_NAME: &str = "announcement";

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

/// Maximum bytes read from an error response body for diagnostics.
///
/// The excerpt is only ever logged. Anything past this bound is left unread.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 100;

/// Per-request timeout applied by the shared HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent with every webhook request.
pub const USER_AGENT: &str = concat!("psa/", env!("CARGO_PKG_VERSION"));
