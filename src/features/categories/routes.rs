use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Every category route sits behind authentication.
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/v1/category", get(handlers::list_categories))
        .route("/api/v1/category/add", post(handlers::create_category))
        .route("/api/v1/category/parent", get(handlers::list_parent_categories))
        .route(
            "/api/v1/category/sub-category",
            get(handlers::list_sub_categories).post(handlers::create_sub_category),
        )
        .route(
            "/api/v1/category/{id}",
            get(handlers::get_category)
                .patch(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}
