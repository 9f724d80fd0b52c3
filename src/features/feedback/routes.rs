use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::feedback::handlers;
use crate::features::feedback::services::FeedbackService;

/// Submission is open to visitors
pub fn public_routes(service: Arc<FeedbackService>) -> Router {
    Router::new()
        .route("/api/v1/feedback/add", post(handlers::create_feedback))
        .with_state(service)
}

pub fn protected_routes(service: Arc<FeedbackService>) -> Router {
    Router::new()
        .route("/api/v1/feedback", get(handlers::list_feedback))
        .route("/api/v1/feedback/{id}", delete(handlers::delete_feedback))
        .with_state(service)
}
