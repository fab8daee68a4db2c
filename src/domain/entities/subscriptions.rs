use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
use crate::infrastructure::postgres::schema::subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub auto_renew: bool,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionEntity {
    /// Active means status `active` and the paid period has not run out.
    /// Derived on read; expiry is never written back as a status.
    pub fn is_active(&self) -> bool {
        SubscriptionStatus::from_str(&self.status) == SubscriptionStatus::Active
            && self.ends_at > Utc::now()
    }

    pub fn days_remaining(&self) -> i64 {
        (self.ends_at - Utc::now()).num_days().max(0)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub struct InsertSubscriptionEntity {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub auto_renew: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_subscription(status: SubscriptionStatus, ends_in: Duration) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            status: status.to_string(),
            starts_at: now - Duration::days(1),
            ends_at: now + ends_in,
            auto_renew: false,
            canceled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn active_status_with_future_end_date_is_active() {
        let subscription = sample_subscription(SubscriptionStatus::Active, Duration::days(10));
        assert!(subscription.is_active());
        assert_eq!(subscription.days_remaining(), 9);
    }

    #[test]
    fn active_status_with_past_end_date_is_not_active() {
        let subscription = sample_subscription(SubscriptionStatus::Active, Duration::days(-1));
        assert!(!subscription.is_active());
        assert_eq!(subscription.days_remaining(), 0);
    }

    #[test]
    fn canceled_status_is_never_active() {
        let subscription = sample_subscription(SubscriptionStatus::Canceled, Duration::days(10));
        assert!(!subscription.is_active());
    }

    #[test]
    fn pending_status_is_not_active() {
        let subscription = sample_subscription(SubscriptionStatus::Pending, Duration::days(10));
        assert!(!subscription.is_active());
    }
}
