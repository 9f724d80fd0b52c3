use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// `None` for root categories
    pub parent_category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Just the parent pointer of a category, used for subtree traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct CategoryLink {
    pub id: Uuid,
    pub parent_category_id: Option<Uuid>,
}

impl From<&Category> for CategoryLink {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            parent_category_id: c.parent_category_id,
        }
    }
}
