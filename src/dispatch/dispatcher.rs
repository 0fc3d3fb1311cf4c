// src/dispatch/dispatcher.rs
//! Fans one rendered announcement out to every configured announcer.

use super::types::{DispatchSummary, TraceEntry, TraceEvent};
use crate::announce::{Announcer, DeliveryOutcome};
use crate::pipeline::AnnouncementDelivery;
use crate::types::RenderedAnnouncement;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

/// Holds the ordered announcers and delivers to all of them.
#[derive(Clone, Default)]
pub struct Dispatcher {
    announcers: Vec<Arc<dyn Announcer>>,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(announcers: Vec<Arc<dyn Announcer>>) -> Self {
        Self {
            announcers,
            verbose: false,
        }
    }

    /// Enables the per-channel trace in the summary and in the log.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn announcer_count(&self) -> usize {
        self.announcers.len()
    }

    /// Delivers `announcement` through every announcer.
    ///
    /// All deliveries run concurrently and each one is attempted regardless of
    /// how the others fare. Results keep configured order, one slot per
    /// announcer. Nothing is cached between calls.
    pub async fn dispatch(&self, announcement: &RenderedAnnouncement) -> DispatchSummary {
        let start_time = Instant::now();
        let message = announcement.as_str();
        let mut summary = DispatchSummary::new();

        if self.verbose {
            for announcer in &self.announcers {
                log::info!("[{}] announcing ...", announcer.name());
                summary.trace.push(TraceEntry {
                    channel: announcer.name().to_string(),
                    event: TraceEvent::Attempting,
                });
            }
        }

        let outcomes: Vec<DeliveryOutcome> = join_all(
            self.announcers
                .iter()
                .map(|announcer| announcer.deliver(message)),
        )
        .await;

        for (announcer, outcome) in self.announcers.iter().zip(outcomes) {
            summary = self.record(summary, announcer.name(), outcome);
        }

        log::debug!(
            "Dispatch complete: {} succeeded, {} failed in {}ms",
            summary.succeeded_count(),
            summary.failure_count(),
            start_time.elapsed().as_millis()
        );

        summary
    }

    fn record(
        &self,
        mut summary: DispatchSummary,
        channel: &str,
        outcome: DeliveryOutcome,
    ) -> DispatchSummary {
        match outcome {
            Ok(()) => {
                if self.verbose {
                    log::info!("[{}] OK!", channel);
                    summary.trace.push(TraceEntry {
                        channel: channel.to_string(),
                        event: TraceEvent::Succeeded,
                    });
                }
                summary.with_succeeded(channel)
            }
            Err(failure) => {
                log::error!("[{}] announce failed: {}", channel, failure.cause);
                if self.verbose {
                    summary.trace.push(TraceEntry {
                        channel: channel.to_string(),
                        event: TraceEvent::Failed(failure.cause.clone()),
                    });
                }
                summary.with_failed(failure)
            }
        }
    }
}

#[async_trait::async_trait]
impl AnnouncementDelivery for Dispatcher {
    async fn deliver(&self, announcement: &RenderedAnnouncement) -> DispatchSummary {
        self.dispatch(announcement).await
    }
}
