pub mod pinned_posts;
pub mod plans;
pub mod posts;
pub mod subscription_history;
pub mod subscriptions;
pub mod users;
