pub mod history_actions;
pub mod post_statuses;
pub mod subscription_statuses;
