pub mod enums;
pub mod pinned_feed;
pub mod pinned_posts;
pub mod plans;
pub mod subscription_history;
pub mod subscriptions;
pub mod users;
