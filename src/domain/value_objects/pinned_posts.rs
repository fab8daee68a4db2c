use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{pinned_posts::PinnedPostEntity, posts::PostEntity};

/// Request body for POST /pin and PUT /pinned-post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinPostModel {
    pub post_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostInfoDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub image: Option<String>,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&PostEntity> for PostInfoDto {
    fn from(post: &PostEntity) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
            views_count: post.views_count,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinnedPostDto {
    pub id: Uuid,
    pub post_id: Uuid,
    pub post_info: PostInfoDto,
    pub pinned_at: DateTime<Utc>,
}

impl PinnedPostDto {
    pub fn from_parts(pin: &PinnedPostEntity, post: &PostEntity) -> Self {
        Self {
            id: pin.id,
            post_id: pin.post_id,
            post_info: PostInfoDto::from(post),
            pinned_at: pin.pinned_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanPinChecks {
    pub post_exists: bool,
    pub is_own_post: bool,
    pub has_subscription: bool,
    pub subscription_active: bool,
}

/// Pre-flight answer for GET /posts/:post_id/can-pin. A missing post is a
/// terminal result, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanPinDto {
    pub post_id: Uuid,
    pub can_pin: bool,
    pub checks: CanPinChecks,
    pub message: String,
}

impl CanPinDto {
    pub fn post_missing(post_id: Uuid) -> Self {
        Self {
            post_id,
            can_pin: false,
            checks: CanPinChecks {
                post_exists: false,
                is_own_post: false,
                has_subscription: false,
                subscription_active: false,
            },
            message: "Post does not exist".to_string(),
        }
    }
}
