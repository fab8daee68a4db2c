pub mod pinned_feed;
pub mod pinned_posts;
pub mod subscriptions;
