pub mod pinned_posts;
pub mod subscriptions;
