// src/pipeline.rs
//! Pipeline capability traits — abstract the two stages of an announcement run.
//!
//! Each trait describes a single capability, enabling testing each stage in isolation.

use crate::dispatch::DispatchSummary;
use crate::error::AppError;
use crate::types::RenderedAnnouncement;

/// Turns raw announcement text into the escaped text every channel receives.
pub trait AnnouncementComposer {
    fn compose(&self, message: &str) -> Result<RenderedAnnouncement, AppError>;
}

/// Delivers a rendered announcement to every configured channel.
#[async_trait::async_trait]
pub trait AnnouncementDelivery {
    async fn deliver(&self, announcement: &RenderedAnnouncement) -> DispatchSummary;
}
