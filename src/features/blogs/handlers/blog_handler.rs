use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::guards::{RequireAdmin, RequireSuperAdmin};
use crate::features::blogs::dtos::{
    BlogDeleteResultDto, BlogListQuery, BlogResponseDto, BlogSearchQuery, BlogUpdateResultDto,
    CreateBlogFormDto, SetMainMediaDto, SetRankDto, UpdateBlogFormDto,
};
use crate::features::blogs::handlers::form::BlogForm;
use crate::features::blogs::services::BlogService;
use crate::features::categories::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// State for blog handlers
#[derive(Clone)]
pub struct BlogState {
    pub blogs: Arc<BlogService>,
    pub categories: Arc<CategoryService>,
    pub max_file_size: usize,
}

/// List blogs
///
/// Sorted by `rank` ascending when `sort=rank`, otherwise by views. With
/// `random=true`, returns up to `limit` distinct blogs picked at random.
#[utoipa::path(
    get,
    path = "/api/v1/blog",
    params(BlogListQuery),
    responses(
        (status = 200, description = "List of blogs", body = ApiResponse<Vec<BlogResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "blogs"
)]
pub async fn list_blogs(
    State(state): State<BlogState>,
    AppQuery(query): AppQuery<BlogListQuery>,
) -> Result<Json<ApiResponse<Vec<BlogResponseDto>>>> {
    let pagination = query.pagination();
    let (blogs, total) = state
        .blogs
        .list(query.sort(), &pagination, query.random)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(blogs),
        None,
        Some(query.meta(total)),
    )))
}

/// Search blogs by title
#[utoipa::path(
    get,
    path = "/api/v1/blog/search",
    params(BlogSearchQuery),
    responses(
        (status = 200, description = "Matching blogs", body = ApiResponse<Vec<BlogResponseDto>>)
    ),
    tag = "blogs"
)]
pub async fn search_blogs(
    State(state): State<BlogState>,
    AppQuery(query): AppQuery<BlogSearchQuery>,
) -> Result<Json<ApiResponse<Vec<BlogResponseDto>>>> {
    let pagination = query.pagination();
    let term = query.name.as_deref().unwrap_or_default();
    let (blogs, total) = state.blogs.search(term, &pagination).await?;

    Ok(Json(ApiResponse::success(
        Some(blogs),
        None,
        Some(Meta::paged(total, &pagination)),
    )))
}

/// Create a blog
///
/// Accepts multipart/form-data with the blog fields and up to 5 `medias`.
#[utoipa::path(
    post,
    path = "/api/v1/blog/add",
    request_body(
        content = CreateBlogFormDto,
        content_type = "multipart/form-data",
        description = "Blog fields plus up to 5 image or video files in `medias`",
    ),
    responses(
        (status = 201, description = "Blog created", body = ApiResponse<BlogResponseDto>),
        (status = 400, description = "Invalid form data or file"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "blogs",
    security(("bearer_auth" = []))
)]
pub async fn create_blog(
    RequireAdmin(user): RequireAdmin,
    State(state): State<BlogState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<BlogResponseDto>>)> {
    let form = BlogForm::read(multipart, state.max_file_size).await?;
    let (dto, uploads, main_media_index) = form.into_create()?;

    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !state.categories.exists(dto.category_id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    let blog = state
        .blogs
        .create(dto, &user.sub, uploads, main_media_index)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(blog),
            Some("Blog created successfully".to_string()),
            None,
        )),
    ))
}

/// Blog detail
///
/// Every call counts as one view.
#[utoipa::path(
    get,
    path = "/api/v1/blog/{id}",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog found", body = ApiResponse<BlogResponseDto>),
        (status = 404, description = "Blog not found")
    ),
    tag = "blogs"
)]
pub async fn get_blog(
    State(state): State<BlogState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BlogResponseDto>>> {
    let blog = state.blogs.view(id).await?;
    Ok(Json(ApiResponse::success(Some(blog), None, None)))
}

/// Update a blog and reconcile its media
///
/// Replacement files in `medias` overwrite the slots listed in
/// `media_indices`, then the slots in `medias_to_remove` are dropped, then
/// `new_medias` are appended.
#[utoipa::path(
    patch,
    path = "/api/v1/blog/{id}",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body(
        content = UpdateBlogFormDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Blog updated", body = ApiResponse<BlogUpdateResultDto>),
        (status = 400, description = "Invalid form data, file or media index"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Blog or category not found")
    ),
    tag = "blogs",
    security(("bearer_auth" = []))
)]
pub async fn update_blog(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<BlogState>,
    AppPath(id): AppPath<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<BlogUpdateResultDto>>> {
    let form = BlogForm::read(multipart, state.max_file_size).await?;
    let (dto, changes) = form.into_update()?;

    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = state.blogs.update(id, dto, changes).await?;
    Ok(Json(ApiResponse::success(
        Some(result),
        Some("Blog updated successfully".to_string()),
        None,
    )))
}

/// Set a blog's rank
#[utoipa::path(
    patch,
    path = "/api/v1/blog/{id}/set-rank",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body = SetRankDto,
    responses(
        (status = 200, description = "Rank updated", body = ApiResponse<BlogResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Blog not found")
    ),
    tag = "blogs",
    security(("bearer_auth" = []))
)]
pub async fn set_rank(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<BlogState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<SetRankDto>,
) -> Result<Json<ApiResponse<BlogResponseDto>>> {
    let blog = state.blogs.set_rank(id, dto.rank).await?;
    Ok(Json(ApiResponse::success(
        Some(blog),
        Some("Rank updated successfully".to_string()),
        None,
    )))
}

/// Pick the primary media of a blog by slot
#[utoipa::path(
    patch,
    path = "/api/v1/blog/{id}/set-main-media",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body = SetMainMediaDto,
    responses(
        (status = 200, description = "Main media updated", body = ApiResponse<BlogResponseDto>),
        (status = 400, description = "Index out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Blog not found")
    ),
    tag = "blogs",
    security(("bearer_auth" = []))
)]
pub async fn set_main_media(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<BlogState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<SetMainMediaDto>,
) -> Result<Json<ApiResponse<BlogResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let blog = state.blogs.set_main_media(id, dto.index).await?;
    Ok(Json(ApiResponse::success(
        Some(blog),
        Some("Main media updated successfully".to_string()),
        None,
    )))
}

/// Delete a blog
///
/// Super admin only. Removes the blog, its media rows and its files.
#[utoipa::path(
    delete,
    path = "/api/v1/blog/{id}",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted", body = ApiResponse<BlogDeleteResultDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Super admin role required"),
        (status = 404, description = "Blog not found")
    ),
    tag = "blogs",
    security(("bearer_auth" = []))
)]
pub async fn delete_blog(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<BlogState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BlogDeleteResultDto>>> {
    let result = state.blogs.delete(id).await?;
    tracing::info!("Blog {} deleted by {}", id, user.sub);

    let message = if result.unremoved_files.is_empty() {
        "Blog deleted successfully".to_string()
    } else {
        format!(
            "Blog deleted; {} media file(s) could not be removed",
            result.unremoved_files.len()
        )
    };

    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}
