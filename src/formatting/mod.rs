// src/formatting/mod.rs
//! Message rendering: turns raw announcement text into the escaped string
//! every channel receives.

pub mod escape;
pub mod template;

pub use escape::escape_html;
pub use template::{render_announcement, MessageTemplate};
