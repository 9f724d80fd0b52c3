use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::blogs::dtos::BlogResponseDto;
use crate::features::categories::models::Category;
use crate::shared::validation::validate_not_blank;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            parent_category_id: c.parent_category_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Category node with its nested children
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sub_categories: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    pub fn from_category(category: &Category, sub_categories: Vec<CategoryTreeDto>) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            parent_category_id: category.parent_category_id,
            created_at: category.created_at,
            updated_at: category.updated_at,
            sub_categories,
        }
    }
}

/// Category together with one page of its blogs
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryDetailDto {
    pub category: CategoryResponseDto,
    pub blogs: Vec<BlogResponseDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank", message = "Name must not be blank")
    )]
    pub name: String,
    pub description: Option<String>,
    /// Omit for a root category
    pub parent_category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubCategoryDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank", message = "Name must not be blank")
    )]
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Uuid,
}

/// Partial update. Sending `"parent_category_id": null` promotes the
/// category to a root; leaving the field out keeps the current parent.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank", message = "Name must not be blank")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Uuid>)]
    pub parent_category_id: Option<Option<Uuid>>,
}

/// Distinguishes an explicit `null` from a missing field
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Outcome of a cascading category delete
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryDeleteResultDto {
    pub category: CategoryResponseDto,
    /// Every removed category id, deepest first
    pub deleted_category_ids: Vec<Uuid>,
    pub deleted_blog_count: i64,
    pub deleted_media_count: i64,
    /// Media files that were unlinked in the database but are still on disk
    pub unremoved_files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_distinguishes_null_parent() {
        let missing: UpdateCategoryDto = serde_json::from_str(r#"{"name":"News"}"#).unwrap();
        assert_eq!(missing.parent_category_id, None);

        let null: UpdateCategoryDto =
            serde_json::from_str(r#"{"parent_category_id":null}"#).unwrap();
        assert_eq!(null.parent_category_id, Some(None));

        let id = Uuid::new_v4();
        let set: UpdateCategoryDto =
            serde_json::from_str(&format!(r#"{{"parent_category_id":"{}"}}"#, id)).unwrap();
        assert_eq!(set.parent_category_id, Some(Some(id)));
    }

    #[test]
    fn test_create_dto_rejects_empty_name() {
        let dto = CreateCategoryDto {
            name: String::new(),
            description: None,
            parent_category_id: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_names_are_rejected() {
        let create = CreateCategoryDto {
            name: "   ".to_string(),
            description: None,
            parent_category_id: None,
        };
        assert!(create.validate().is_err());

        let sub = CreateSubCategoryDto {
            name: "\t".to_string(),
            description: None,
            parent_category_id: Uuid::new_v4(),
        };
        assert!(sub.validate().is_err());

        let update = UpdateCategoryDto {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let untouched = UpdateCategoryDto::default();
        assert!(untouched.validate().is_ok());
    }
}
