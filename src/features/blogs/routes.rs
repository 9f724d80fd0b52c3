use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::features::blogs::handlers::{self, BlogState};
use crate::shared::constants::MAX_MEDIA_FILES_PER_FIELD;

/// Multipart bodies carry up to two file fields of `MAX_MEDIA_FILES_PER_FIELD`
/// files each, plus 1MB for text fields and multipart overhead
fn upload_body_limit(max_file_size: usize) -> usize {
    max_file_size
        .saturating_mul(2 * MAX_MEDIA_FILES_PER_FIELD)
        .saturating_add(1024 * 1024)
}

/// Blog routes open to visitors
pub fn public_routes(state: BlogState) -> Router {
    Router::new()
        .route("/api/v1/blog", get(handlers::list_blogs))
        .route("/api/v1/blog/search", get(handlers::search_blogs))
        .route("/api/v1/blog/{id}", get(handlers::get_blog))
        .with_state(state)
}

/// Blog routes that require an authenticated admin
pub fn protected_routes(state: BlogState) -> Router {
    let body_limit = DefaultBodyLimit::max(upload_body_limit(state.max_file_size));

    Router::new()
        .route(
            "/api/v1/blog/add",
            post(handlers::create_blog).layer(body_limit),
        )
        .route(
            "/api/v1/blog/{id}",
            patch(handlers::update_blog)
                .post(handlers::update_blog)
                .layer(body_limit)
                .delete(handlers::delete_blog),
        )
        .route("/api/v1/blog/{id}/set-rank", patch(handlers::set_rank))
        .route(
            "/api/v1/blog/{id}/set-main-media",
            patch(handlers::set_main_media),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;
    use tempfile::TempDir;
    use uuid::Uuid;

    use crate::features::blogs::BlogService;
    use crate::features::categories::CategoryService;
    use crate::modules::storage::LocalFileStore;
    use crate::shared::test_helpers::{
        lazy_pool, with_admin_auth, with_super_admin_auth, TestServices,
    };

    fn test_state(upload_dir: &TempDir) -> BlogState {
        let pool = lazy_pool();
        let file_store = Arc::new(LocalFileStore::new(upload_dir.path()));
        let blogs = Arc::new(BlogService::new(pool.clone(), Arc::clone(&file_store)));
        let categories = Arc::new(CategoryService::new(
            pool,
            Arc::clone(&blogs),
            file_store,
        ));

        BlogState {
            blogs,
            categories,
            max_file_size: 1024,
        }
    }

    #[tokio::test]
    async fn test_delete_requires_super_admin() {
        let dir = TempDir::new().unwrap();
        let server = TestServer::new(with_admin_auth(protected_routes(test_state(&dir)))).unwrap();

        let response = server
            .delete(&format!("/api/v1/blog/{}", Uuid::new_v4()))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_super_admin_delete_rejects_malformed_id() {
        let dir = TempDir::new().unwrap();
        let server =
            TestServer::new(with_super_admin_auth(protected_routes(test_state(&dir)))).unwrap();

        let response = server.delete("/api/v1/blog/not-a-uuid").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_search_returns_nothing() {
        let dir = TempDir::new().unwrap();
        let server = TestServer::new(public_routes(test_state(&dir))).unwrap();

        let response = server
            .get("/api/v1/blog/search")
            .add_query_param("name", "   ")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"], serde_json::json!([]));
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_create_rejects_unsupported_file_type() {
        let dir = TempDir::new().unwrap();
        let server = TestServer::new(with_admin_auth(protected_routes(test_state(&dir)))).unwrap();

        let form = MultipartForm::new()
            .add_text("title", "Computer")
            .add_part(
                "medias",
                Part::bytes(b"%PDF-1.4".to_vec())
                    .file_name("doc.pdf")
                    .mime_type("application/pdf"),
            );

        let response = server.post("/api/v1/blog/add").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_file() {
        let dir = TempDir::new().unwrap();
        let server = TestServer::new(with_admin_auth(protected_routes(test_state(&dir)))).unwrap();

        let form = MultipartForm::new().add_part(
            "medias",
            Part::bytes(vec![0u8; 4096])
                .file_name("big.png")
                .mime_type("image/png"),
        );

        let response = server.post("/api/v1/blog/add").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_blog_id_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let server = TestServer::new(public_routes(test_state(&dir))).unwrap();

        let response = server.get("/api/v1/blog/123").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    fn live_state(ctx: &TestServices) -> BlogState {
        BlogState {
            blogs: Arc::clone(&ctx.blogs),
            categories: Arc::clone(&ctx.categories),
            max_file_size: 1024,
        }
    }

    #[tokio::test]
    async fn test_admin_delete_leaves_blog_and_files() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };
        let category = ctx.category("Guarded", None).await;
        let blog = ctx.blog(category, 0, 2).await;
        let server = TestServer::new(with_admin_auth(protected_routes(live_state(&ctx)))).unwrap();

        let response = server.delete(&format!("/api/v1/blog/{}", blog.id)).await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert!(ctx.blog_exists(blog.id).await);
        assert_eq!(ctx.media_rows(blog.id).await, 2);
        assert!(blog.medias.iter().all(|path| ctx.file_exists(path)));
    }

    #[tokio::test]
    async fn test_super_admin_delete_removes_blog_and_files() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };
        let category = ctx.category("Removable", None).await;
        let blog = ctx.blog(category, 0, 1).await;
        let server =
            TestServer::new(with_super_admin_auth(protected_routes(live_state(&ctx)))).unwrap();

        let response = server.delete(&format!("/api/v1/blog/{}", blog.id)).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["unremoved_files"], serde_json::json!([]));
        assert!(!ctx.blog_exists(blog.id).await);
        assert!(blog.medias.iter().all(|path| !ctx.file_exists(path)));
    }

    #[tokio::test]
    async fn test_two_detail_requests_count_two_views() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };
        let category = ctx.category("Counted", None).await;
        let blog = ctx.blog(category, 0, 0).await;
        let server = TestServer::new(public_routes(live_state(&ctx))).unwrap();
        let path = format!("/api/v1/blog/{}", blog.id);

        server.get(&path).await.assert_status_ok();
        let body: Value = server.get(&path).await.json();

        assert_eq!(body["data"]["view"], 2);
    }

    #[test]
    fn test_upload_body_limit_covers_both_fields() {
        assert_eq!(upload_body_limit(10), 10 * 10 + 1024 * 1024);
        assert_eq!(upload_body_limit(usize::MAX), usize::MAX);
    }
}
