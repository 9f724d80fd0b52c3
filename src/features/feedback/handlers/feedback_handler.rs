use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::feedback::dtos::{CreateFeedbackDto, FeedbackResponseDto};
use crate::features::feedback::services::FeedbackService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Submit feedback
#[utoipa::path(
    post,
    path = "/api/v1/feedback/add",
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback saved", body = ApiResponse<FeedbackResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "feedback"
)]
pub async fn create_feedback(
    State(service): State<Arc<FeedbackService>>,
    AppJson(dto): AppJson<CreateFeedbackDto>,
) -> Result<(StatusCode, Json<ApiResponse<FeedbackResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let feedback = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(feedback),
            Some("Success".to_string()),
            None,
        )),
    ))
}

/// List feedback, newest first
#[utoipa::path(
    get,
    path = "/api/v1/feedback",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of feedback", body = ApiResponse<Vec<FeedbackResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "feedback",
    security(("bearer_auth" = []))
)]
pub async fn list_feedback(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<FeedbackService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<FeedbackResponseDto>>>> {
    let (feedbacks, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(feedbacks),
        None,
        Some(Meta::paged(total, &pagination)),
    )))
}

/// Delete feedback
#[utoipa::path(
    delete,
    path = "/api/v1/feedback/{id}",
    params(("id" = Uuid, Path, description = "Feedback ID")),
    responses(
        (status = 200, description = "Feedback deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "feedback",
    security(("bearer_auth" = []))
)]
pub async fn delete_feedback(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<FeedbackService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Feedback has been deleted".to_string()),
        None,
    )))
}
