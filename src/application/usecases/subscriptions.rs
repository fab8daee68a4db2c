use std::sync::Arc;

use anyhow::anyhow;
use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::{
        pinned_posts::PinnedPostRepository, plans::PlanRepository, posts::PostRepository,
        subscriptions::SubscriptionRepository, users::UserRepository,
    },
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus,
        pinned_posts::PinnedPostDto,
        plans::PlanDto,
        subscription_history::SubscriptionHistoryDto,
        subscriptions::{InsertSubscriptionModel, SubscriptionDto, UserSubscriptionStatusDto},
    },
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("selected plan is not active")]
    PlanNotActive,
    #[error("user already holds an active subscription")]
    AlreadySubscribed,
    #[error("no subscription found")]
    SubscriptionNotFound,
    #[error("no active subscription found")]
    NotActive,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::PlanNotActive => StatusCode::BAD_REQUEST,
            SubscriptionError::AlreadySubscribed => StatusCode::CONFLICT,
            SubscriptionError::SubscriptionNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::NotActive => StatusCode::BAD_REQUEST,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<P, S, Pin, Post, U>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
    pinned_post_repo: Arc<Pin>,
    post_repo: Arc<Post>,
    user_repo: Arc<U>,
}

impl<P, S, Pin, Post, U> SubscriptionUseCase<P, S, Pin, Post, U>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(
        plan_repo: Arc<P>,
        subscription_repo: Arc<S>,
        pinned_post_repo: Arc<Pin>,
        post_repo: Arc<Post>,
        user_repo: Arc<U>,
    ) -> Self {
        Self {
            plan_repo,
            subscription_repo,
            pinned_post_repo,
            post_repo,
            user_repo,
        }
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanDto>> {
        let plans = self.plan_repo.list_active_plans().await?;
        info!(plan_count = plans.len(), "subscriptions: active plans loaded");
        Ok(plans.into_iter().map(PlanDto::from).collect())
    }

    pub async fn get_plan(&self, plan_id: Uuid) -> UseCaseResult<PlanDto> {
        let plan = self
            .plan_repo
            .find_active_by_id(plan_id)
            .await?
            .ok_or(SubscriptionError::PlanNotFound)?;

        Ok(PlanDto::from(plan))
    }

    pub async fn subscribe(
        &self,
        user_id: Uuid,
        insert_subscription_model: InsertSubscriptionModel,
    ) -> UseCaseResult<SubscriptionDto> {
        let plan_id = insert_subscription_model.plan_id;
        info!(%user_id, %plan_id, "subscriptions: subscribe requested");

        let plan = self
            .plan_repo
            .find_active_by_id(plan_id)
            .await?
            .ok_or_else(|| {
                let err = SubscriptionError::PlanNotActive;
                warn!(
                    %user_id,
                    %plan_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: plan missing or inactive"
                );
                err
            })?;

        if let Some(current) = self.subscription_repo.find_by_user_id(user_id).await? {
            if current.is_active() {
                let err = SubscriptionError::AlreadySubscribed;
                warn!(
                    %user_id,
                    subscription_id = %current.id,
                    status = err.status_code().as_u16(),
                    "subscriptions: user already holds an active subscription"
                );
                return Err(err);
            }
        }

        // TODO: the activation step is what sets the real period; until it
        // runs, starts_at == ends_at and the subscription reads as expired.
        let now = Utc::now();
        let subscription = self
            .subscription_repo
            .create_pending(InsertSubscriptionEntity {
                user_id,
                plan_id,
                status: SubscriptionStatus::Pending.to_string(),
                starts_at: now,
                ends_at: now,
                auto_renew: false,
            })
            .await?;

        info!(
            %user_id,
            %plan_id,
            subscription_id = %subscription.id,
            "subscriptions: pending subscription created"
        );

        self.build_subscription_dto(&subscription, Some(plan)).await
    }

    /// Payment-confirmation step: stamps the real paid period from the plan
    /// duration and flips the subscription to active.
    pub async fn activate(&self, user_id: Uuid) -> UseCaseResult<SubscriptionDto> {
        let subscription = self
            .subscription_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(SubscriptionError::SubscriptionNotFound)?;

        if subscription.is_active() {
            let err = SubscriptionError::AlreadySubscribed;
            warn!(
                %user_id,
                subscription_id = %subscription.id,
                status = err.status_code().as_u16(),
                "subscriptions: activation rejected, subscription already active"
            );
            return Err(err);
        }

        let plan = self
            .plan_repo
            .find_by_id(subscription.plan_id)
            .await?
            .ok_or_else(|| {
                SubscriptionError::Internal(anyhow!(
                    "subscription {} references missing plan {}",
                    subscription.id,
                    subscription.plan_id
                ))
            })?;

        let starts_at = Utc::now();
        let ends_at = starts_at + Duration::days(i64::from(plan.duration_days));
        self.subscription_repo
            .activate(subscription.id, starts_at, ends_at)
            .await?;

        info!(
            %user_id,
            subscription_id = %subscription.id,
            %ends_at,
            "subscriptions: subscription activated"
        );

        let activated = self
            .subscription_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                SubscriptionError::Internal(anyhow!(
                    "subscription {} disappeared during activation",
                    subscription.id
                ))
            })?;

        self.build_subscription_dto(&activated, Some(plan)).await
    }

    pub async fn get_subscription(&self, user_id: Uuid) -> UseCaseResult<SubscriptionDto> {
        let subscription = self
            .subscription_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(SubscriptionError::SubscriptionNotFound)?;

        self.build_subscription_dto(&subscription, None).await
    }

    pub async fn list_history(&self, user_id: Uuid) -> UseCaseResult<Vec<SubscriptionHistoryDto>> {
        let subscription = match self.subscription_repo.find_by_user_id(user_id).await? {
            Some(subscription) => subscription,
            None => return Ok(Vec::new()),
        };

        let entries = self.subscription_repo.list_history(subscription.id).await?;
        Ok(entries
            .into_iter()
            .map(SubscriptionHistoryDto::from)
            .collect())
    }

    pub async fn cancel(&self, user_id: Uuid) -> UseCaseResult<()> {
        let subscription = self
            .subscription_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                let err = SubscriptionError::SubscriptionNotFound;
                warn!(
                    %user_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: no subscription to cancel"
                );
                err
            })?;

        // A second cancel observes `canceled` and fails here, never a
        // silent no-op.
        if !subscription.is_active() {
            let err = SubscriptionError::NotActive;
            warn!(
                %user_id,
                subscription_id = %subscription.id,
                subscription_status = %subscription.status,
                status = err.status_code().as_u16(),
                "subscriptions: cancel rejected, subscription not active"
            );
            return Err(err);
        }

        let canceled = self
            .subscription_repo
            .cancel_with_pin_removal(user_id)
            .await?;

        if !canceled {
            // A concurrent cancel committed between the check above and the
            // transaction.
            let err = SubscriptionError::NotActive;
            warn!(
                %user_id,
                subscription_id = %subscription.id,
                status = err.status_code().as_u16(),
                "subscriptions: cancel lost the race, row already canceled"
            );
            return Err(err);
        }

        info!(
            %user_id,
            subscription_id = %subscription.id,
            "subscriptions: subscription canceled and pin removed"
        );

        Ok(())
    }

    pub async fn status(&self, user_id: Uuid) -> UseCaseResult<UserSubscriptionStatusDto> {
        let subscription = match self.subscription_repo.find_by_user_id(user_id).await? {
            Some(subscription) => subscription,
            None => {
                return Ok(UserSubscriptionStatusDto {
                    has_subscription: false,
                    is_active: false,
                    subscription: None,
                    pinned_post: None,
                    can_pin_posts: false,
                });
            }
        };

        let is_active = subscription.is_active();
        let pinned_post = if is_active {
            self.load_pinned_post(user_id).await?
        } else {
            None
        };

        let subscription_dto = self.build_subscription_dto(&subscription, None).await?;

        Ok(UserSubscriptionStatusDto {
            has_subscription: true,
            is_active,
            subscription: Some(subscription_dto),
            pinned_post,
            can_pin_posts: is_active,
        })
    }

    async fn load_pinned_post(&self, user_id: Uuid) -> UseCaseResult<Option<PinnedPostDto>> {
        let pin = match self.pinned_post_repo.find_by_user_id(user_id).await? {
            Some(pin) => pin,
            None => return Ok(None),
        };

        let post = self
            .post_repo
            .find_by_id(pin.post_id)
            .await?
            .ok_or_else(|| {
                SubscriptionError::Internal(anyhow!(
                    "pinned post {} references missing post {}",
                    pin.id,
                    pin.post_id
                ))
            })?;

        Ok(Some(PinnedPostDto::from_parts(&pin, &post)))
    }

    async fn build_subscription_dto(
        &self,
        subscription: &SubscriptionEntity,
        plan: Option<crate::domain::entities::plans::PlanEntity>,
    ) -> UseCaseResult<SubscriptionDto> {
        let plan = match plan {
            Some(plan) => plan,
            None => self
                .plan_repo
                .find_by_id(subscription.plan_id)
                .await?
                .ok_or_else(|| {
                    SubscriptionError::Internal(anyhow!(
                        "subscription {} references missing plan {}",
                        subscription.id,
                        subscription.plan_id
                    ))
                })?,
        };

        let user = self
            .user_repo
            .find_by_id(subscription.user_id)
            .await?
            .ok_or_else(|| {
                SubscriptionError::Internal(anyhow!(
                    "subscription {} references missing user {}",
                    subscription.id,
                    subscription.user_id
                ))
            })?;

        Ok(SubscriptionDto::from_parts(subscription, plan, &user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mockall::predicate::eq;
    use serde_json::json;

    use crate::application::usecases::pinned_posts::{PinError, PinnedPostUseCase};
    use crate::domain::{
        entities::{
            pinned_posts::PinnedPostEntity, plans::PlanEntity, posts::PostEntity,
            users::UserEntity,
        },
        repositories::{
            pinned_posts::MockPinnedPostRepository, plans::MockPlanRepository,
            posts::MockPostRepository, subscriptions::MockSubscriptionRepository,
            users::MockUserRepository,
        },
        value_objects::enums::post_statuses::PostStatus,
    };

    fn sample_plan(id: Uuid) -> PlanEntity {
        PlanEntity {
            id,
            name: "Pro".to_string(),
            price_minor: 990,
            duration_days: 30,
            features: json!({"pin_posts": true}),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn sample_user(id: Uuid) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id,
            username: "writer".to_string(),
            email: "writer@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            bio: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_subscription(
        user_id: Uuid,
        plan_id: Uuid,
        status: SubscriptionStatus,
        ends_in: Duration,
    ) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id,
            plan_id,
            status: status.to_string(),
            starts_at: now - Duration::days(1),
            ends_at: now + ends_in,
            auto_renew: false,
            canceled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_post(post_id: Uuid, author_id: Uuid) -> PostEntity {
        let now = Utc::now();
        PostEntity {
            id: post_id,
            author_id,
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            content: "body".to_string(),
            image: None,
            category: Some("essays".to_string()),
            views_count: 3,
            comments_count: 1,
            status: PostStatus::Published.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase(
        plan_repo: MockPlanRepository,
        subscription_repo: MockSubscriptionRepository,
        pinned_post_repo: MockPinnedPostRepository,
        post_repo: MockPostRepository,
        user_repo: MockUserRepository,
    ) -> SubscriptionUseCase<
        MockPlanRepository,
        MockSubscriptionRepository,
        MockPinnedPostRepository,
        MockPostRepository,
        MockUserRepository,
    > {
        SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(pinned_post_repo),
            Arc::new(post_repo),
            Arc::new(user_repo),
        )
    }

    #[tokio::test]
    async fn subscribe_rejects_inactive_plan() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_active_by_id()
            .with(eq(plan_id))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = usecase(
            plan_repo,
            MockSubscriptionRepository::new(),
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        let result = usecase
            .subscribe(user_id, InsertSubscriptionModel { plan_id })
            .await;

        assert!(matches!(result, Err(SubscriptionError::PlanNotActive)));
    }

    #[tokio::test]
    async fn subscribe_rejects_duplicate_active_subscription() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        let plan = sample_plan(plan_id);
        plan_repo
            .expect_find_active_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });

        let mut subscription_repo = MockSubscriptionRepository::new();
        let current =
            sample_subscription(user_id, plan_id, SubscriptionStatus::Active, Duration::days(5));
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(move |_| {
                let current = current.clone();
                Box::pin(async move { Ok(Some(current)) })
            });

        let usecase = usecase(
            plan_repo,
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        let result = usecase
            .subscribe(user_id, InsertSubscriptionModel { plan_id })
            .await;

        assert!(matches!(result, Err(SubscriptionError::AlreadySubscribed)));
    }

    #[tokio::test]
    async fn subscribe_creates_pending_subscription() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        let plan = sample_plan(plan_id);
        plan_repo
            .expect_find_active_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));
        subscription_repo
            .expect_create_pending()
            .withf(move |insert| {
                insert.user_id == user_id
                    && insert.plan_id == plan_id
                    && insert.status == SubscriptionStatus::Pending.to_string()
                    && insert.starts_at == insert.ends_at
            })
            .returning(move |insert| {
                let now = Utc::now();
                let entity = SubscriptionEntity {
                    id: Uuid::new_v4(),
                    user_id: insert.user_id,
                    plan_id: insert.plan_id,
                    status: insert.status,
                    starts_at: insert.starts_at,
                    ends_at: insert.ends_at,
                    auto_renew: insert.auto_renew,
                    canceled_at: None,
                    created_at: now,
                    updated_at: now,
                };
                Box::pin(async move { Ok(entity) })
            });

        let mut user_repo = MockUserRepository::new();
        let user = sample_user(user_id);
        user_repo
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| {
                let user = user.clone();
                Box::pin(async move { Ok(Some(user)) })
            });

        let usecase = usecase(
            plan_repo,
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            user_repo,
        );

        let dto = usecase
            .subscribe(user_id, InsertSubscriptionModel { plan_id })
            .await
            .unwrap();

        assert_eq!(dto.status, SubscriptionStatus::Pending);
        assert!(!dto.is_active);
        assert_eq!(dto.days_remaining, 0);
        assert_eq!(dto.plan_info.name, "Pro");
    }

    #[tokio::test]
    async fn cancel_without_subscription_is_not_found() {
        let user_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = usecase(
            MockPlanRepository::new(),
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        let result = usecase.cancel(user_id).await;
        assert!(matches!(
            result,
            Err(SubscriptionError::SubscriptionNotFound)
        ));
    }

    #[tokio::test]
    async fn cancel_of_canceled_subscription_fails_instead_of_no_op() {
        let user_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        let current = sample_subscription(
            user_id,
            Uuid::new_v4(),
            SubscriptionStatus::Canceled,
            Duration::days(5),
        );
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(move |_| {
                let current = current.clone();
                Box::pin(async move { Ok(Some(current)) })
            });

        let usecase = usecase(
            MockPlanRepository::new(),
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        let result = usecase.cancel(user_id).await;
        assert!(matches!(result, Err(SubscriptionError::NotActive)));
    }

    #[tokio::test]
    async fn cancel_of_active_subscription_runs_single_atomic_repo_call() {
        let user_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        let current = sample_subscription(
            user_id,
            Uuid::new_v4(),
            SubscriptionStatus::Active,
            Duration::days(5),
        );
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(move |_| {
                let current = current.clone();
                Box::pin(async move { Ok(Some(current)) })
            });
        subscription_repo
            .expect_cancel_with_pin_removal()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(true) }));

        let usecase = usecase(
            MockPlanRepository::new(),
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        usecase.cancel(user_id).await.unwrap();
    }

    #[tokio::test]
    async fn cancel_losing_a_race_maps_to_not_active() {
        let user_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        let current = sample_subscription(
            user_id,
            Uuid::new_v4(),
            SubscriptionStatus::Active,
            Duration::days(5),
        );
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(move |_| {
                let current = current.clone();
                Box::pin(async move { Ok(Some(current)) })
            });
        // A concurrent cancel already flipped the row, so the transaction
        // updates zero rows.
        subscription_repo
            .expect_cancel_with_pin_removal()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(false) }));

        let usecase = usecase(
            MockPlanRepository::new(),
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        let result = usecase.cancel(user_id).await;
        assert!(matches!(result, Err(SubscriptionError::NotActive)));
    }

    #[tokio::test]
    async fn activate_of_active_subscription_is_rejected() {
        let user_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        let current = sample_subscription(
            user_id,
            Uuid::new_v4(),
            SubscriptionStatus::Active,
            Duration::days(5),
        );
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(move |_| {
                let current = current.clone();
                Box::pin(async move { Ok(Some(current)) })
            });

        let usecase = usecase(
            MockPlanRepository::new(),
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        let result = usecase.activate(user_id).await;
        assert!(matches!(result, Err(SubscriptionError::AlreadySubscribed)));
    }

    // Walks the whole lifecycle against a shared in-memory store: subscribe
    // leaves a pending row that cannot pin, activation stamps the plan
    // period, a pin shows up in the status projection, and cancel removes
    // the pin and blocks a second cancel.
    #[tokio::test]
    async fn lifecycle_from_subscribe_to_cancel() {
        use std::sync::Mutex;

        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let post_id = Uuid::new_v4();

        let subscription_store: Arc<Mutex<Option<SubscriptionEntity>>> =
            Arc::new(Mutex::new(None));
        let pin_store: Arc<Mutex<Option<PinnedPostEntity>>> = Arc::new(Mutex::new(None));

        let plan = sample_plan(plan_id);
        let post = sample_post(post_id, user_id);

        let mut subscription_repo = MockSubscriptionRepository::new();
        {
            let store = Arc::clone(&subscription_store);
            subscription_repo
                .expect_find_by_user_id()
                .with(eq(user_id))
                .returning(move |_| {
                    let current = store.lock().unwrap().clone();
                    Box::pin(async move { Ok(current) })
                });
        }
        {
            let store = Arc::clone(&subscription_store);
            subscription_repo
                .expect_create_pending()
                .returning(move |insert| {
                    let now = Utc::now();
                    let entity = SubscriptionEntity {
                        id: Uuid::new_v4(),
                        user_id: insert.user_id,
                        plan_id: insert.plan_id,
                        status: insert.status,
                        starts_at: insert.starts_at,
                        ends_at: insert.ends_at,
                        auto_renew: insert.auto_renew,
                        canceled_at: None,
                        created_at: now,
                        updated_at: now,
                    };
                    *store.lock().unwrap() = Some(entity.clone());
                    Box::pin(async move { Ok(entity) })
                });
        }
        {
            let store = Arc::clone(&subscription_store);
            subscription_repo.expect_activate().returning(
                move |subscription_id, starts_at, ends_at| {
                    let mut guard = store.lock().unwrap();
                    if let Some(current) = guard.as_mut() {
                        assert_eq!(current.id, subscription_id);
                        current.status = SubscriptionStatus::Active.to_string();
                        current.starts_at = starts_at;
                        current.ends_at = ends_at;
                    }
                    Box::pin(async { Ok(()) })
                },
            );
        }
        {
            let store = Arc::clone(&subscription_store);
            let pins = Arc::clone(&pin_store);
            subscription_repo
                .expect_cancel_with_pin_removal()
                .with(eq(user_id))
                .returning(move |_| {
                    let mut guard = store.lock().unwrap();
                    let canceled = match guard.as_mut() {
                        Some(current)
                            if current.status == SubscriptionStatus::Active.to_string() =>
                        {
                            current.status = SubscriptionStatus::Canceled.to_string();
                            current.canceled_at = Some(Utc::now());
                            *pins.lock().unwrap() = None;
                            true
                        }
                        _ => false,
                    };
                    Box::pin(async move { Ok(canceled) })
                });
        }

        let mut plan_repo = MockPlanRepository::new();
        {
            let plan = plan.clone();
            plan_repo.expect_find_active_by_id().returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });
        }
        {
            let plan = plan.clone();
            plan_repo.expect_find_by_id().returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });
        }

        let mut user_repo = MockUserRepository::new();
        {
            let user = sample_user(user_id);
            user_repo.expect_find_by_id().returning(move |_| {
                let user = user.clone();
                Box::pin(async move { Ok(Some(user)) })
            });
        }

        let mut pinned_post_repo = MockPinnedPostRepository::new();
        {
            let pins = Arc::clone(&pin_store);
            pinned_post_repo.expect_find_by_user_id().returning(move |_| {
                let pin = pins.lock().unwrap().clone();
                Box::pin(async move { Ok(pin) })
            });
        }

        let mut post_repo = MockPostRepository::new();
        {
            let post = post.clone();
            post_repo.expect_find_by_id().returning(move |_| {
                let post = post.clone();
                Box::pin(async move { Ok(Some(post)) })
            });
        }

        let subscriptions = usecase(
            plan_repo,
            subscription_repo,
            pinned_post_repo,
            post_repo,
            user_repo,
        );

        let mut pin_repo_for_pins = MockPinnedPostRepository::new();
        {
            let pins = Arc::clone(&pin_store);
            pin_repo_for_pins.expect_replace_pin().returning(move |insert| {
                let pin = PinnedPostEntity {
                    id: Uuid::new_v4(),
                    user_id: insert.user_id,
                    post_id: insert.post_id,
                    pinned_at: Utc::now(),
                };
                *pins.lock().unwrap() = Some(pin.clone());
                Box::pin(async move { Ok(pin) })
            });
        }
        let mut post_repo_for_pins = MockPostRepository::new();
        {
            let post = post.clone();
            post_repo_for_pins
                .expect_find_published_by_id()
                .returning(move |_| {
                    let post = post.clone();
                    Box::pin(async move { Ok(Some(post)) })
                });
        }
        let mut subscription_repo_for_pins = MockSubscriptionRepository::new();
        {
            let store = Arc::clone(&subscription_store);
            subscription_repo_for_pins
                .expect_find_by_user_id()
                .with(eq(user_id))
                .returning(move |_| {
                    let current = store.lock().unwrap().clone();
                    Box::pin(async move { Ok(current) })
                });
        }
        let pins = PinnedPostUseCase::new(
            Arc::new(pin_repo_for_pins),
            Arc::new(post_repo_for_pins),
            Arc::new(subscription_repo_for_pins),
        );

        let pending = subscriptions
            .subscribe(user_id, InsertSubscriptionModel { plan_id })
            .await
            .unwrap();
        assert_eq!(pending.status, SubscriptionStatus::Pending);
        assert!(!pending.is_active);

        let denied = pins.pin_post(user_id, post_id).await;
        assert!(matches!(denied, Err(PinError::SubscriptionRequired)));

        let activated = subscriptions.activate(user_id).await.unwrap();
        assert_eq!(activated.status, SubscriptionStatus::Active);
        assert!(activated.is_active);
        assert!(activated.days_remaining >= 29);

        pins.pin_post(user_id, post_id).await.unwrap();

        let status = subscriptions.status(user_id).await.unwrap();
        assert!(status.is_active);
        assert!(status.can_pin_posts);
        assert_eq!(
            status.pinned_post.as_ref().map(|pin| pin.post_id),
            Some(post_id)
        );

        subscriptions.cancel(user_id).await.unwrap();

        let after = subscriptions.status(user_id).await.unwrap();
        assert!(after.has_subscription);
        assert!(!after.is_active);
        assert!(!after.can_pin_posts);
        assert!(after.pinned_post.is_none());

        let second = subscriptions.cancel(user_id).await;
        assert!(matches!(second, Err(SubscriptionError::NotActive)));
    }

    #[tokio::test]
    async fn status_without_subscription_cannot_pin() {
        let user_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = usecase(
            MockPlanRepository::new(),
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        let status = usecase.status(user_id).await.unwrap();
        assert!(!status.has_subscription);
        assert!(!status.is_active);
        assert!(!status.can_pin_posts);
        assert!(status.subscription.is_none());
        assert!(status.pinned_post.is_none());
    }

    #[tokio::test]
    async fn status_with_expired_subscription_hides_pin_and_blocks_pinning() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        let current = sample_subscription(
            user_id,
            plan_id,
            SubscriptionStatus::Active,
            Duration::days(-1),
        );
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(move |_| {
                let current = current.clone();
                Box::pin(async move { Ok(Some(current)) })
            });

        let mut plan_repo = MockPlanRepository::new();
        let plan = sample_plan(plan_id);
        plan_repo.expect_find_by_id().returning(move |_| {
            let plan = plan.clone();
            Box::pin(async move { Ok(Some(plan)) })
        });

        let mut user_repo = MockUserRepository::new();
        let user = sample_user(user_id);
        user_repo.expect_find_by_id().returning(move |_| {
            let user = user.clone();
            Box::pin(async move { Ok(Some(user)) })
        });

        let usecase = usecase(
            plan_repo,
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            user_repo,
        );

        let status = usecase.status(user_id).await.unwrap();
        assert!(status.has_subscription);
        assert!(!status.is_active);
        assert!(!status.can_pin_posts);
        assert!(status.pinned_post.is_none());
    }

    #[tokio::test]
    async fn history_is_empty_without_subscription() {
        let user_id = Uuid::new_v4();

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_user_id()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = usecase(
            MockPlanRepository::new(),
            subscription_repo,
            MockPinnedPostRepository::new(),
            MockPostRepository::new(),
            MockUserRepository::new(),
        );

        let history = usecase.list_history(user_id).await.unwrap();
        assert!(history.is_empty());
    }
}
