use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::application::usecases::{pinned_posts::PinError, subscriptions::SubscriptionError};

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            // Validation errors stay field-keyed for form rendering.
            SubscriptionError::PlanNotActive => {
                json!({ "plan": ["Selected plan is not active."] })
            }
            SubscriptionError::AlreadySubscribed => {
                json!({ "error": "User already holds an active subscription." })
            }
            SubscriptionError::PlanNotFound => json!({ "detail": "Plan not found" }),
            SubscriptionError::SubscriptionNotFound => {
                json!({ "detail": "No subscription found" })
            }
            SubscriptionError::NotActive => json!({ "error": "No active subscription found" }),
            SubscriptionError::Internal(err) => {
                error!(error = ?err, "subscriptions: internal error");
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for PinError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            PinError::PostNotFound => json!({ "error": "Post not found or not published" }),
            PinError::NotPostAuthor => json!({ "error": "You can only pin your own posts." }),
            PinError::SubscriptionRequired => {
                json!({ "error": "Active subscription required to pin posts." })
            }
            PinError::PinNotFound => json!({ "error": "No pin post found" }),
            PinError::Internal(err) => {
                error!(error = ?err, "pinned_posts: internal error");
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

pub fn internal_server_error(err: anyhow::Error) -> Response {
    error!(error = ?err, "internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
