use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{Connection, RunQueryDsl, delete, insert_into, prelude::*, update, upsert::excluded};
use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            subscription_history::{InsertSubscriptionHistoryEntity, SubscriptionHistoryEntity},
            subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        },
        repositories::subscriptions::SubscriptionRepository,
        value_objects::enums::{
            history_actions::HistoryAction, subscription_statuses::SubscriptionStatus,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{pinned_posts, subscription_history, subscriptions},
    },
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn create_pending(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let subscription = conn.transaction::<_, anyhow::Error, _>(|conn| {
            // One subscription row per user; re-subscribing after a cancel
            // or expiry resets the existing row to pending.
            let subscription = insert_into(subscriptions::table)
                .values(&insert_subscription_entity)
                .on_conflict(subscriptions::user_id)
                .do_update()
                .set((
                    subscriptions::plan_id.eq(excluded(subscriptions::plan_id)),
                    subscriptions::status.eq(excluded(subscriptions::status)),
                    subscriptions::starts_at.eq(excluded(subscriptions::starts_at)),
                    subscriptions::ends_at.eq(excluded(subscriptions::ends_at)),
                    subscriptions::auto_renew.eq(excluded(subscriptions::auto_renew)),
                    subscriptions::canceled_at.eq(None::<DateTime<Utc>>),
                    subscriptions::updated_at.eq(Utc::now()),
                ))
                .returning(SubscriptionEntity::as_returning())
                .get_result::<SubscriptionEntity>(conn)?;

            insert_into(subscription_history::table)
                .values(InsertSubscriptionHistoryEntity {
                    subscription_id: subscription.id,
                    action: HistoryAction::Created.to_string(),
                    description: "Subscription created".to_string(),
                    metadata: json!({ "plan_id": subscription.plan_id }),
                })
                .execute(conn)?;

            Ok(subscription)
        })?;

        Ok(subscription)
    }

    async fn activate(
        &self,
        subscription_id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, anyhow::Error, _>(|conn| {
            update(subscriptions::table)
                .filter(subscriptions::id.eq(subscription_id))
                .set((
                    subscriptions::status.eq(SubscriptionStatus::Active.to_string()),
                    subscriptions::starts_at.eq(starts_at),
                    subscriptions::ends_at.eq(ends_at),
                    subscriptions::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            insert_into(subscription_history::table)
                .values(InsertSubscriptionHistoryEntity {
                    subscription_id,
                    action: HistoryAction::Activated.to_string(),
                    description: "Subscription activated".to_string(),
                    metadata: json!({
                        "starts_at": starts_at,
                        "ends_at": ends_at,
                    }),
                })
                .execute(conn)?;

            Ok(())
        })?;

        Ok(())
    }

    async fn cancel_with_pin_removal(&self, user_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Status flip, pin removal and the audit entry commit together or
        // not at all. The status filter makes the loser of two racing
        // cancels update zero rows instead of appending a second history
        // entry.
        let canceled = conn.transaction::<bool, anyhow::Error, _>(|conn| {
            let subscription_id = subscriptions::table
                .filter(subscriptions::user_id.eq(user_id))
                .select(subscriptions::id)
                .first::<Uuid>(conn)
                .optional()?;

            let Some(subscription_id) = subscription_id else {
                return Ok(false);
            };

            let affected = update(subscriptions::table)
                .filter(subscriptions::id.eq(subscription_id))
                .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
                .set((
                    subscriptions::status.eq(SubscriptionStatus::Canceled.to_string()),
                    subscriptions::canceled_at.eq(Some(Utc::now())),
                    subscriptions::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            if affected == 0 {
                return Ok(false);
            }

            delete(pinned_posts::table)
                .filter(pinned_posts::user_id.eq(user_id))
                .execute(conn)?;

            insert_into(subscription_history::table)
                .values(InsertSubscriptionHistoryEntity {
                    subscription_id,
                    action: HistoryAction::Canceled.to_string(),
                    description: "Subscription canceled by user".to_string(),
                    metadata: json!({}),
                })
                .execute(conn)?;

            Ok(true)
        })?;

        Ok(canceled)
    }

    async fn list_history(
        &self,
        subscription_id: Uuid,
    ) -> Result<Vec<SubscriptionHistoryEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscription_history::table
            .filter(subscription_history::subscription_id.eq(subscription_id))
            .order(subscription_history::created_at.desc())
            .select(SubscriptionHistoryEntity::as_select())
            .load::<SubscriptionHistoryEntity>(&mut conn)?;

        Ok(results)
    }
}
