// src/dispatch/mod.rs
//! Fan-out of one announcement to many channels.
//!
//! The dispatcher never aborts on a failed channel; every outcome lands in a
//! [`DispatchSummary`] that the caller turns into the final log line.

mod dispatcher;
mod types;

pub use dispatcher::Dispatcher;
pub use types::{DispatchSummary, TraceEntry, TraceEvent};
