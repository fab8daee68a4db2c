use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::subscription_history::SubscriptionHistoryEntity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionHistoryDto {
    pub id: Uuid,
    pub action: String,
    pub description: String,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl From<SubscriptionHistoryEntity> for SubscriptionHistoryDto {
    fn from(entry: SubscriptionHistoryEntity) -> Self {
        Self {
            id: entry.id,
            action: entry.action,
            description: entry.description,
            metadata: entry.metadata,
            created_at: entry.created_at,
        }
    }
}
