use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::domain::{
    repositories::pinned_posts::PinnedPostRepository,
    value_objects::pinned_feed::{PinnedFeedDto, PinnedFeedEntryDto},
};

/// Public feed of pins held by users whose subscription is still active.
pub struct PinnedFeedUseCase<Pin>
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
{
    pinned_post_repo: Arc<Pin>,
}

impl<Pin> PinnedFeedUseCase<Pin>
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
{
    pub fn new(pinned_post_repo: Arc<Pin>) -> Self {
        Self { pinned_post_repo }
    }

    pub async fn list_pinned_posts(&self) -> Result<PinnedFeedDto> {
        let rows = self.pinned_post_repo.list_active_pins().await?;

        let results: Vec<PinnedFeedEntryDto> = rows
            .iter()
            .map(|(pin, post, author)| PinnedFeedEntryDto::from_parts(pin, post, author))
            .collect();

        info!(pin_count = results.len(), "pinned_feed: feed loaded");

        Ok(PinnedFeedDto {
            count: results.len(),
            results,
        })
    }
}
