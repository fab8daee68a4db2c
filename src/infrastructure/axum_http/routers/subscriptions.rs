use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    application::usecases::subscriptions::SubscriptionUseCase,
    auth::AuthUser,
    domain::{
        repositories::{
            pinned_posts::PinnedPostRepository, plans::PlanRepository, posts::PostRepository,
            subscriptions::SubscriptionRepository, users::UserRepository,
        },
        value_objects::subscriptions::InsertSubscriptionModel,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{
            pinned_posts::PinnedPostPostgres, plans::PlanPostgres, posts::PostPostgres,
            subscriptions::SubscriptionPostgres, users::UserPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repo = PlanPostgres::new(Arc::clone(&db_pool));
    let subscription_repo = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let pinned_post_repo = PinnedPostPostgres::new(Arc::clone(&db_pool));
    let post_repo = PostPostgres::new(Arc::clone(&db_pool));
    let user_repo = UserPostgres::new(Arc::clone(&db_pool));

    let subscriptions_usecase = SubscriptionUseCase::new(
        Arc::new(plan_repo),
        Arc::new(subscription_repo),
        Arc::new(pinned_post_repo),
        Arc::new(post_repo),
        Arc::new(user_repo),
    );

    Router::new()
        .route("/plans", get(list_plans))
        .route("/plans/:plan_id", get(get_plan))
        .route("/subscription", get(get_subscription).post(subscribe))
        .route("/subscription/history", get(list_history))
        .route("/subscription/cancel", post(cancel_subscription))
        .route("/subscription/status", get(subscription_status))
        .with_state(Arc::new(subscriptions_usecase))
}

pub async fn list_plans<P, S, Pin, Post, U>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, Pin, Post, U>>>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match subscriptions_usecase.list_plans().await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_plan<P, S, Pin, Post, U>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, Pin, Post, U>>>,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match subscriptions_usecase.get_plan(plan_id).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn subscribe<P, S, Pin, Post, U>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, Pin, Post, U>>>,
    auth: AuthUser,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match subscriptions_usecase
        .subscribe(auth.user_id, insert_subscription_model)
        .await
    {
        Ok(subscription) => (StatusCode::CREATED, Json(subscription)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_subscription<P, S, Pin, Post, U>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, Pin, Post, U>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match subscriptions_usecase.get_subscription(auth.user_id).await {
        Ok(subscription) => (StatusCode::OK, Json(subscription)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_history<P, S, Pin, Post, U>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, Pin, Post, U>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match subscriptions_usecase.list_history(auth.user_id).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn cancel_subscription<P, S, Pin, Post, U>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, Pin, Post, U>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match subscriptions_usecase.cancel(auth.user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Subscription canceled successfully." })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn subscription_status<P, S, Pin, Post, U>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S, Pin, Post, U>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match subscriptions_usecase.status(auth.user_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(err) => err.into_response(),
    }
}
