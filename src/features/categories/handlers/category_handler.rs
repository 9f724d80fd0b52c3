use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::categories::dtos::{
    CategoryDeleteResultDto, CategoryDetailDto, CategoryResponseDto, CategoryTreeDto,
    CreateCategoryDto, CreateSubCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Create a category
///
/// Omit `parent_category_id` for a root category.
#[utoipa::path(
    post,
    path = "/api/v1/category/add",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Parent category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Category created successfully".to_string()),
            None,
        )),
    ))
}

/// Create a child of an existing category
#[utoipa::path(
    post,
    path = "/api/v1/category/sub-category",
    request_body = CreateSubCategoryDto,
    responses(
        (status = 201, description = "Sub-category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Parent category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn create_sub_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateSubCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create_subcategory(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Sub-category created successfully".to_string()),
            None,
        )),
    ))
}

/// Full category tree
#[utoipa::path(
    get,
    path = "/api/v1/category",
    responses(
        (status = 200, description = "Nested category tree", body = ApiResponse<Vec<CategoryTreeDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    let tree = service.find_all().await?;
    Ok(Json(ApiResponse::success(Some(tree), None, None)))
}

/// Root categories
#[utoipa::path(
    get,
    path = "/api/v1/category/parent",
    responses(
        (status = 200, description = "Categories without a parent", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn list_parent_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.find_parents().await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta {
            total,
            page: None,
            limit: None,
        }),
    )))
}

/// Categories that have a parent
#[utoipa::path(
    get,
    path = "/api/v1/category/sub-category",
    responses(
        (status = 200, description = "Non-root categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn list_sub_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.find_sub_categories().await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta {
            total,
            page: None,
            limit: None,
        }),
    )))
}

/// Category with a page of its blogs
#[utoipa::path(
    get,
    path = "/api/v1/category/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<CategoryDetailDto>>> {
    let (detail, total) = service.detail(id, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(detail),
        None,
        Some(Meta::paged(total, &pagination)),
    )))
}

/// Update a category
///
/// Send `"parent_category_id": null` to promote the category to a root.
#[utoipa::path(
    patch,
    path = "/api/v1/category/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or cyclic re-parent"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category or new parent not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category updated successfully".to_string()),
        None,
    )))
}

/// Delete a category with its whole subtree
///
/// Removes every descendant category, every blog in any of them and the
/// blogs' media files. Files that could not be removed from disk are listed
/// in `unremoved_files`.
#[utoipa::path(
    delete,
    path = "/api/v1/category/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<CategoryDeleteResultDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<CategoryDeleteResultDto>>> {
    let result = service.delete(id).await?;

    let message = if result.unremoved_files.is_empty() {
        "Category deleted successfully".to_string()
    } else {
        format!(
            "Category deleted; {} media file(s) could not be removed",
            result.unremoved_files.len()
        )
    };

    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}
