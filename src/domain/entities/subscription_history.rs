use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::subscription_history;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscription_history)]
pub struct SubscriptionHistoryEntity {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub action: String,
    pub description: String,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscription_history)]
pub struct InsertSubscriptionHistoryEntity {
    pub subscription_id: Uuid,
    pub action: String,
    pub description: String,
    pub metadata: Value,
}
