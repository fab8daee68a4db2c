use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::posts::PostEntity;

#[async_trait]
#[automock]
pub trait PostRepository {
    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<PostEntity>>;
    async fn find_published_by_id(&self, post_id: Uuid) -> Result<Option<PostEntity>>;
}
