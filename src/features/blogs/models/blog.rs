use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for blog
#[derive(Debug, Clone, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub external_link: String,
    pub message_link: String,
    pub rank: i32,
    pub view: i64,
    /// Path of the primary media; always one of the blog's media paths
    pub main_media: Option<String>,
    pub category_id: Uuid,
    /// Subject of the admin token that created the blog
    pub admin_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One slot of a blog's ordered media list
#[derive(Debug, Clone, FromRow)]
pub struct Media {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub path: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}
