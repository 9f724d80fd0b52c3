use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::feedback::dtos::{CreateFeedbackDto, FeedbackResponseDto};
use crate::features::feedback::models::Feedback;
use crate::shared::types::PaginationQuery;

const FEEDBACK_COLUMNS: &str = "id, name, email, subject, message, created_at, updated_at";

/// Service for visitor feedback
pub struct FeedbackService {
    pool: PgPool,
}

impl FeedbackService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateFeedbackDto) -> Result<FeedbackResponseDto> {
        let query = format!(
            "INSERT INTO feedback (name, email, subject, message) VALUES ($1, $2, $3, $4) RETURNING {}",
            FEEDBACK_COLUMNS
        );

        let feedback = sqlx::query_as::<_, Feedback>(&query)
            .bind(dto.name.trim())
            .bind(&dto.email)
            .bind(&dto.subject)
            .bind(&dto.message)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to save feedback: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Feedback received: {}", feedback.id);
        Ok(feedback.into())
    }

    /// Newest first, with the total number of feedback entries
    pub async fn list(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<FeedbackResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {} FROM feedback ORDER BY created_at DESC, id LIMIT $1 OFFSET $2",
            FEEDBACK_COLUMNS
        );

        let feedbacks = sqlx::query_as::<_, Feedback>(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((feedbacks.into_iter().map(Into::into).collect(), total))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Feedback with id {} not found",
                id
            )));
        }

        tracing::info!("Feedback deleted: {}", id);
        Ok(())
    }
}
