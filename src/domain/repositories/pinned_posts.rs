use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::{
    pinned_posts::{InsertPinnedPostEntity, PinnedPostEntity},
    posts::PostEntity,
    users::UserEntity,
};

#[async_trait]
#[automock]
pub trait PinnedPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<PinnedPostEntity>>;

    /// Deletes any existing pin for the user and inserts the new one in a
    /// single transaction. The unique index on `user_id` settles races.
    async fn replace_pin(
        &self,
        insert_pinned_post_entity: InsertPinnedPostEntity,
    ) -> Result<PinnedPostEntity>;

    /// Returns whether a pin row was actually removed.
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool>;

    /// Pins whose owner has an active, unexpired subscription and whose post
    /// is still published, oldest pin first.
    async fn list_active_pins(&self)
    -> Result<Vec<(PinnedPostEntity, PostEntity, UserEntity)>>;
}
