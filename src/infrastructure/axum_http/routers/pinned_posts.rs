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
    application::usecases::{
        pinned_feed::PinnedFeedUseCase,
        pinned_posts::{PinError, PinnedPostUseCase},
    },
    auth::AuthUser,
    domain::{
        repositories::{
            pinned_posts::PinnedPostRepository, posts::PostRepository,
            subscriptions::SubscriptionRepository,
        },
        value_objects::pinned_posts::PinPostModel,
    },
    infrastructure::{
        axum_http::error_responses::internal_server_error,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                pinned_posts::PinnedPostPostgres, posts::PostPostgres,
                subscriptions::SubscriptionPostgres,
            },
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let pinned_post_repo = Arc::new(PinnedPostPostgres::new(Arc::clone(&db_pool)));
    let post_repo = Arc::new(PostPostgres::new(Arc::clone(&db_pool)));
    let subscription_repo = Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool)));

    let pinned_posts_usecase = PinnedPostUseCase::new(
        Arc::clone(&pinned_post_repo),
        post_repo,
        subscription_repo,
    );
    let pinned_feed_usecase = PinnedFeedUseCase::new(pinned_post_repo);

    let pin_routes = Router::new()
        .route("/pin", post(pin_post))
        .route("/unpin", post(unpin_post))
        .route(
            "/pinned-post",
            get(get_pinned_post)
                .put(replace_pinned_post)
                .delete(delete_pinned_post),
        )
        .route("/posts/:post_id/can-pin", get(can_pin_post))
        .with_state(Arc::new(pinned_posts_usecase));

    let feed_routes = Router::new()
        .route("/pinned-posts", get(list_pinned_posts))
        .with_state(Arc::new(pinned_feed_usecase));

    pin_routes.merge(feed_routes)
}

pub async fn pin_post<Pin, Post, S>(
    State(pinned_posts_usecase): State<Arc<PinnedPostUseCase<Pin, Post, S>>>,
    auth: AuthUser,
    Json(pin_post_model): Json<PinPostModel>,
) -> impl IntoResponse
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match pinned_posts_usecase
        .pin_post(auth.user_id, pin_post_model.post_id)
        .await
    {
        Ok(pin) => (StatusCode::CREATED, Json(pin)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn replace_pinned_post<Pin, Post, S>(
    State(pinned_posts_usecase): State<Arc<PinnedPostUseCase<Pin, Post, S>>>,
    auth: AuthUser,
    Json(pin_post_model): Json<PinPostModel>,
) -> impl IntoResponse
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match pinned_posts_usecase
        .pin_post(auth.user_id, pin_post_model.post_id)
        .await
    {
        Ok(pin) => (StatusCode::OK, Json(pin)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn unpin_post<Pin, Post, S>(
    State(pinned_posts_usecase): State<Arc<PinnedPostUseCase<Pin, Post, S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match pinned_posts_usecase.unpin_post(auth.user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Post unpinned successfully." })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_pinned_post<Pin, Post, S>(
    State(pinned_posts_usecase): State<Arc<PinnedPostUseCase<Pin, Post, S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match pinned_posts_usecase.get_pin(auth.user_id).await {
        Ok(pin) => (StatusCode::OK, Json(pin)).into_response(),
        Err(PinError::PinNotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "No pin post found" })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_pinned_post<Pin, Post, S>(
    State(pinned_posts_usecase): State<Arc<PinnedPostUseCase<Pin, Post, S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match pinned_posts_usecase.unpin_post(auth.user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(PinError::PinNotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "No pin post found" })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn can_pin_post<Pin, Post, S>(
    State(pinned_posts_usecase): State<Arc<PinnedPostUseCase<Pin, Post, S>>>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> impl IntoResponse
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match pinned_posts_usecase.can_pin(auth.user_id, post_id).await {
        Ok(answer) => {
            // Missing post keeps the original 404 while the body stays a
            // regular pre-flight answer.
            let status = if answer.checks.post_exists {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            };
            (status, Json(answer)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn list_pinned_posts<Pin>(
    State(pinned_feed_usecase): State<Arc<PinnedFeedUseCase<Pin>>>,
) -> impl IntoResponse
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
{
    match pinned_feed_usecase.list_pinned_posts().await {
        Ok(feed) => (StatusCode::OK, Json(feed)).into_response(),
        Err(err) => internal_server_error(err),
    }
}
