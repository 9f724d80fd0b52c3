use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::feedback::models::Feedback;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[schema(example = "Jane")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "Subject must be at most 255 characters"))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponseDto {
    fn from(f: Feedback) -> Self {
        Self {
            id: f.id,
            name: f.name,
            email: f.email,
            subject: f.subject,
            message: f.message,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}
