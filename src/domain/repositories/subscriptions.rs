use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::{
    subscription_history::SubscriptionHistoryEntity,
    subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    /// Inserts the subscription and its `created` history entry in one
    /// transaction.
    async fn create_pending(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;

    /// External activation step (payment confirmation) sets the real period.
    async fn activate(
        &self,
        subscription_id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Cancels the user's subscription, removes any pinned post and appends
    /// a `canceled` history entry, all in one transaction. Returns false
    /// when the row was no longer `active`, so the loser of two racing
    /// cancels cannot commit a second time.
    async fn cancel_with_pin_removal(&self, user_id: Uuid) -> Result<bool>;

    async fn list_history(&self, subscription_id: Uuid)
    -> Result<Vec<SubscriptionHistoryEntity>>;
}
