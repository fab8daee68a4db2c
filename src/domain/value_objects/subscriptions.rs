use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    plans::PlanEntity, subscriptions::SubscriptionEntity, users::UserEntity,
};
use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
use crate::domain::value_objects::pinned_posts::PinnedPostDto;
use crate::domain::value_objects::plans::PlanDto;
use crate::domain::value_objects::users::UserInfoDto;

/// Request body for POST /subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertSubscriptionModel {
    pub plan_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_info: UserInfoDto,
    pub plan_id: Uuid,
    pub plan_info: PlanDto,
    pub status: SubscriptionStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub auto_renew: bool,
    pub is_active: bool,
    pub days_remaining: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionDto {
    pub fn from_parts(
        subscription: &SubscriptionEntity,
        plan: PlanEntity,
        user: &UserEntity,
    ) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            user_info: UserInfoDto::from(user),
            plan_id: subscription.plan_id,
            plan_info: PlanDto::from(plan),
            status: SubscriptionStatus::from_str(&subscription.status),
            starts_at: subscription.starts_at,
            ends_at: subscription.ends_at,
            auto_renew: subscription.auto_renew,
            is_active: subscription.is_active(),
            days_remaining: subscription.days_remaining(),
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}

/// Combined projection for GET /subscription/status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSubscriptionStatusDto {
    pub has_subscription: bool,
    pub is_active: bool,
    pub subscription: Option<SubscriptionDto>,
    pub pinned_post: Option<PinnedPostDto>,
    pub can_pin_posts: bool,
}
