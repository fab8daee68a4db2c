use std::sync::Arc;

use anyhow::anyhow;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::pinned_posts::InsertPinnedPostEntity,
    repositories::{
        pinned_posts::PinnedPostRepository, posts::PostRepository,
        subscriptions::SubscriptionRepository,
    },
    value_objects::pinned_posts::{CanPinChecks, CanPinDto, PinnedPostDto},
};

#[derive(Debug, Error)]
pub enum PinError {
    #[error("post not found or not published")]
    PostNotFound,
    #[error("you can only pin your own posts")]
    NotPostAuthor,
    #[error("active subscription required to pin posts")]
    SubscriptionRequired,
    #[error("no pin post found")]
    PinNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PinError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PinError::PostNotFound => StatusCode::NOT_FOUND,
            PinError::NotPostAuthor => StatusCode::FORBIDDEN,
            PinError::SubscriptionRequired => StatusCode::FORBIDDEN,
            PinError::PinNotFound => StatusCode::NOT_FOUND,
            PinError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PinResult<T> = std::result::Result<T, PinError>;

pub struct PinnedPostUseCase<Pin, Post, S>
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pinned_post_repo: Arc<Pin>,
    post_repo: Arc<Post>,
    subscription_repo: Arc<S>,
}

impl<Pin, Post, S> PinnedPostUseCase<Pin, Post, S>
where
    Pin: PinnedPostRepository + Send + Sync + 'static,
    Post: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(pinned_post_repo: Arc<Pin>, post_repo: Arc<Post>, subscription_repo: Arc<S>) -> Self {
        Self {
            pinned_post_repo,
            post_repo,
            subscription_repo,
        }
    }

    /// Precondition order matters: missing post is 404 before any
    /// ownership or subscription verdict leaks.
    pub async fn pin_post(&self, user_id: Uuid, post_id: Uuid) -> PinResult<PinnedPostDto> {
        info!(%user_id, %post_id, "pinned_posts: pin requested");

        let post = self
            .post_repo
            .find_published_by_id(post_id)
            .await?
            .ok_or_else(|| {
                let err = PinError::PostNotFound;
                warn!(
                    %user_id,
                    %post_id,
                    status = err.status_code().as_u16(),
                    "pinned_posts: post missing or unpublished"
                );
                err
            })?;

        if post.author_id != user_id {
            let err = PinError::NotPostAuthor;
            warn!(
                %user_id,
                %post_id,
                author_id = %post.author_id,
                status = err.status_code().as_u16(),
                "pinned_posts: pin rejected, caller is not the author"
            );
            return Err(err);
        }

        let has_active_subscription = self
            .subscription_repo
            .find_by_user_id(user_id)
            .await?
            .is_some_and(|subscription| subscription.is_active());

        if !has_active_subscription {
            let err = PinError::SubscriptionRequired;
            warn!(
                %user_id,
                %post_id,
                status = err.status_code().as_u16(),
                "pinned_posts: pin rejected, no active subscription"
            );
            return Err(err);
        }

        let pin = self
            .pinned_post_repo
            .replace_pin(InsertPinnedPostEntity { user_id, post_id })
            .await?;

        info!(
            %user_id,
            %post_id,
            pin_id = %pin.id,
            "pinned_posts: pin replaced"
        );

        Ok(PinnedPostDto::from_parts(&pin, &post))
    }

    pub async fn unpin_post(&self, user_id: Uuid) -> PinResult<()> {
        let deleted = self.pinned_post_repo.delete_by_user_id(user_id).await?;

        if !deleted {
            let err = PinError::PinNotFound;
            warn!(
                %user_id,
                status = err.status_code().as_u16(),
                "pinned_posts: nothing to unpin"
            );
            return Err(err);
        }

        info!(%user_id, "pinned_posts: pin removed");
        Ok(())
    }

    pub async fn get_pin(&self, user_id: Uuid) -> PinResult<PinnedPostDto> {
        let pin = self
            .pinned_post_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(PinError::PinNotFound)?;

        let post = self
            .post_repo
            .find_by_id(pin.post_id)
            .await?
            .ok_or_else(|| {
                PinError::Internal(anyhow!(
                    "pinned post {} references missing post {}",
                    pin.id,
                    pin.post_id
                ))
            })?;

        Ok(PinnedPostDto::from_parts(&pin, &post))
    }

    /// Pure read for the UI pre-flight; a missing post is a terminal answer,
    /// not an error.
    pub async fn can_pin(&self, user_id: Uuid, post_id: Uuid) -> PinResult<CanPinDto> {
        let post = match self.post_repo.find_published_by_id(post_id).await? {
            Some(post) => post,
            None => return Ok(CanPinDto::post_missing(post_id)),
        };

        let subscription = self.subscription_repo.find_by_user_id(user_id).await?;

        let checks = CanPinChecks {
            post_exists: true,
            is_own_post: post.author_id == user_id,
            has_subscription: subscription.is_some(),
            subscription_active: subscription
                .as_ref()
                .is_some_and(|subscription| subscription.is_active()),
        };

        let can_pin = checks.is_own_post && checks.has_subscription && checks.subscription_active;
        let message = if can_pin {
            "Can pin post"
        } else {
            "Cannot pin post"
        };

        Ok(CanPinDto {
            post_id: post.id,
            can_pin,
            checks,
            message: message.to_string(),
        })
    }
}
