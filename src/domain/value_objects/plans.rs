use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDto {
    pub id: Uuid,
    pub name: String,
    pub price_minor: i32,
    pub duration_days: i32,
    pub features: Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PlanEntity> for PlanDto {
    fn from(plan: PlanEntity) -> Self {
        // Clients expect a feature map, never null.
        let features = match plan.features {
            Value::Null => serde_json::json!({}),
            other => other,
        };

        Self {
            id: plan.id,
            name: plan.name,
            price_minor: plan.price_minor,
            duration_days: plan.duration_days,
            features,
            is_active: plan.is_active,
            created_at: plan.created_at,
        }
    }
}
