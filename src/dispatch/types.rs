// src/dispatch/types.rs
//! Type definitions for dispatch results.

use crate::error::{DeliveryFailure, FailureCause};
use std::fmt;

/// Result of one dispatch round across all configured announcers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Channels that accepted the announcement, in configured order
    pub succeeded: Vec<String>,
    /// Channels that did not, in configured order
    pub failed: Vec<DeliveryFailure>,
    /// Per-channel attempt log; only filled in verbose mode
    pub trace: Vec<TraceEntry>,
}

impl DispatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful delivery.
    pub fn with_succeeded(mut self, channel: impl Into<String>) -> Self {
        self.succeeded.push(channel.into());
        self
    }

    /// Records a failed delivery.
    pub fn with_failed(mut self, failure: DeliveryFailure) -> Self {
        self.failed.push(failure);
        self
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// True when no channel failed, including when none was configured.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// One line of the verbose per-channel trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub channel: String,
    pub event: TraceEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Attempting,
    Succeeded,
    Failed(FailureCause),
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            TraceEvent::Attempting => write!(f, "[{}] announcing ...", self.channel),
            TraceEvent::Succeeded => write!(f, "[{}] OK!", self.channel),
            TraceEvent::Failed(cause) => write!(f, "[{}] announce failed: {}", self.channel, cause),
        }
    }
}
