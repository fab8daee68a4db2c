use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, RunQueryDsl, delete, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            pinned_posts::{InsertPinnedPostEntity, PinnedPostEntity},
            posts::PostEntity,
            users::UserEntity,
        },
        repositories::pinned_posts::PinnedPostRepository,
        value_objects::enums::{
            post_statuses::PostStatus, subscription_statuses::SubscriptionStatus,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{pinned_posts, posts, subscriptions, users},
    },
};

pub struct PinnedPostPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PinnedPostPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PinnedPostRepository for PinnedPostPostgres {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<PinnedPostEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = pinned_posts::table
            .filter(pinned_posts::user_id.eq(user_id))
            .select(PinnedPostEntity::as_select())
            .first::<PinnedPostEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn replace_pin(
        &self,
        insert_pinned_post_entity: InsertPinnedPostEntity,
    ) -> Result<PinnedPostEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Delete and insert commit together; the unique index on user_id
        // makes one of two racing replacements fail instead of leaving two
        // pins.
        let pin = conn.transaction::<_, anyhow::Error, _>(|conn| {
            delete(pinned_posts::table)
                .filter(pinned_posts::user_id.eq(insert_pinned_post_entity.user_id))
                .execute(conn)?;

            let pin = insert_into(pinned_posts::table)
                .values(&insert_pinned_post_entity)
                .returning(PinnedPostEntity::as_returning())
                .get_result::<PinnedPostEntity>(conn)?;

            Ok(pin)
        })?;

        Ok(pin)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted_rows = delete(pinned_posts::table)
            .filter(pinned_posts::user_id.eq(user_id))
            .execute(&mut conn)?;

        Ok(deleted_rows > 0)
    }

    async fn list_active_pins(
        &self,
    ) -> Result<Vec<(PinnedPostEntity, PostEntity, UserEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = pinned_posts::table
            .inner_join(posts::table.on(posts::id.eq(pinned_posts::post_id)))
            .inner_join(users::table.on(users::id.eq(pinned_posts::user_id)))
            .inner_join(
                subscriptions::table.on(subscriptions::user_id.eq(pinned_posts::user_id)),
            )
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .filter(subscriptions::ends_at.gt(Utc::now()))
            .filter(posts::status.eq(PostStatus::Published.to_string()))
            .order(pinned_posts::pinned_at.asc())
            .select((
                PinnedPostEntity::as_select(),
                PostEntity::as_select(),
                UserEntity::as_select(),
            ))
            .load::<(PinnedPostEntity, PostEntity, UserEntity)>(&mut conn)?;

        Ok(results)
    }
}
