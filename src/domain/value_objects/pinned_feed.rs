use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    pinned_posts::PinnedPostEntity, posts::PostEntity, users::UserEntity,
};

const CONTENT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedAuthorDto {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinnedFeedEntryDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub author: FeedAuthorDto,
    pub views_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub pinned_at: DateTime<Utc>,
    pub is_pinned: bool,
}

impl PinnedFeedEntryDto {
    pub fn from_parts(pin: &PinnedPostEntity, post: &PostEntity, author: &UserEntity) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: truncate_content(&post.content),
            image: post.image.clone(),
            category: post.category.clone(),
            author: FeedAuthorDto {
                id: author.id,
                username: author.username.clone(),
                full_name: author.full_name(),
            },
            views_count: post.views_count,
            comments_count: post.comments_count,
            created_at: post.created_at,
            pinned_at: pin.pinned_at,
            is_pinned: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinnedFeedDto {
    pub count: usize,
    pub results: Vec<PinnedFeedEntryDto>,
}

/// Char-based so a multi-byte boundary can never split.
pub fn truncate_content(content: &str) -> String {
    if content.chars().count() > CONTENT_PREVIEW_CHARS {
        let preview: String = content.chars().take(CONTENT_PREVIEW_CHARS).collect();
        format!("{}...", preview)
    } else {
        content.to_string()
    }
}
