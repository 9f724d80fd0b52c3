use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::blogs::models::Blog;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::{Meta, PaginationQuery};

/// Response DTO for blog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogResponseDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub external_link: String,
    pub message_link: String,
    pub rank: i32,
    pub view: i64,
    /// Relative path of the primary media (e.g. `uploads/blog/<uuid>.jpg`)
    pub main_media: Option<String>,
    /// Media paths in display order
    pub medias: Vec<String>,
    pub category_id: Uuid,
    pub admin_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogResponseDto {
    pub fn from_blog(blog: Blog, medias: Vec<String>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            external_link: blog.external_link,
            message_link: blog.message_link,
            rank: blog.rank,
            view: blog.view,
            main_media: blog.main_media,
            medias,
            category_id: blog.category_id,
            admin_id: blog.admin_id,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

/// Scalar fields of a new blog, read from the multipart form
#[derive(Debug, Clone, Validate)]
pub struct CreateBlogDto {
    #[validate(length(min = 1, max = 500, message = "Title must be 1-500 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(min = 1, message = "External link is required"))]
    pub external_link: String,
    #[validate(length(min = 1, message = "Message link is required"))]
    pub message_link: String,
    pub category_id: Uuid,
    pub rank: Option<i32>,
}

/// Scalar fields of a blog update; absent fields are left untouched
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateBlogDto {
    #[validate(length(min = 1, max = 500, message = "Title must be 1-500 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    #[validate(length(min = 1, message = "External link cannot be empty"))]
    pub external_link: Option<String>,
    #[validate(length(min = 1, message = "Message link cannot be empty"))]
    pub message_link: Option<String>,
    pub category_id: Option<Uuid>,
    pub rank: Option<i32>,
}

/// An accepted upload that has not been written yet
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub extension: &'static str,
    pub data: Bytes,
}

/// Media instructions of an update request
#[derive(Debug, Clone, Default)]
pub struct MediaChanges {
    pub replacements: Vec<MediaUpload>,
    pub replace_indices: Vec<i64>,
    pub remove_indices: Vec<i64>,
    pub appended: Vec<MediaUpload>,
    pub main_media_index: Option<i64>,
}

/// Create blog form, for OpenAPI documentation only.
/// The handler reads the multipart body directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateBlogFormDto {
    #[schema(example = "Computer")]
    pub title: String,
    #[schema(example = "Electronic computer...")]
    pub content: String,
    pub external_link: String,
    pub message_link: String,
    pub category_id: Uuid,
    pub rank: Option<i32>,
    /// Up to 5 image or video files
    pub medias: Vec<String>,
    /// Index into `medias` of the primary media (defaults to 0)
    pub main_media_index: Option<i64>,
}

/// Update blog form, for OpenAPI documentation only
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UpdateBlogFormDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub external_link: Option<String>,
    pub message_link: Option<String>,
    pub category_id: Option<Uuid>,
    pub rank: Option<i32>,
    /// Replacement files, paired one to one with `media_indices`
    pub medias: Vec<String>,
    /// JSON array of slots to replace, e.g. `[0,2]`
    #[schema(example = "[0,2]")]
    pub media_indices: Option<String>,
    /// JSON array of slots to remove, e.g. `[1]`
    #[schema(example = "[1]")]
    pub medias_to_remove: Option<String>,
    /// Files appended to the end of the list
    pub new_medias: Vec<String>,
    /// Index into `new_medias` of the new primary media
    pub main_media_index: Option<i64>,
}

/// Ordering of the public blog list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogSort {
    /// `rank` ascending
    Rank,
    /// `view` descending
    Popularity,
}

impl BlogSort {
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some("rank") => BlogSort::Rank,
            _ => BlogSort::Popularity,
        }
    }

    pub fn order_by(self) -> &'static str {
        match self {
            BlogSort::Rank => "rank ASC, created_at DESC, id",
            BlogSort::Popularity => "view DESC, created_at DESC, id",
        }
    }
}

/// Query params for the public blog list
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogListQuery {
    /// `rank` for rank ascending, anything else for most viewed first
    pub sort: Option<String>,
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page (default: 20, max: 100)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Return `limit` distinct blogs picked at random instead of a page
    #[serde(default)]
    pub random: bool,
}

impl BlogListQuery {
    pub fn sort(&self) -> BlogSort {
        BlogSort::from_key(self.sort.as_deref())
    }

    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.limit)
    }

    /// List metadata; `page` is left out in random mode since it is ignored there
    pub fn meta(&self, total: i64) -> Meta {
        let pagination = self.pagination();
        if self.random {
            Meta::sampled(total, pagination.limit())
        } else {
            Meta::paged(total, &pagination)
        }
    }
}

/// Query params for title search
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogSearchQuery {
    /// Case-insensitive substring of the title
    pub name: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl BlogSearchQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.limit)
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRankDto {
    pub rank: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetMainMediaDto {
    /// Slot in the blog's media list
    #[validate(range(min = 0, message = "Index cannot be negative"))]
    pub index: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BlogUpdateResultDto {
    pub blog: BlogResponseDto,
    /// Replaced or removed files that are still on disk
    pub unremoved_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BlogDeleteResultDto {
    pub blog: BlogResponseDto,
    /// Media files of the deleted blog that are still on disk
    pub unremoved_files: Vec<String>,
}

/// Accepted upload types and the extension each is stored with
pub const ALLOWED_MEDIA_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("video/mp4", "mp4"),
    ("video/avi", "avi"),
    ("video/x-msvideo", "avi"),
    ("video/mkv", "mkv"),
    ("video/x-matroska", "mkv"),
    ("video/mov", "mov"),
    ("video/quicktime", "mov"),
];

/// Storage extension for an accepted content type, `None` if the type is not allowed
pub fn media_extension(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    ALLOWED_MEDIA_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == mime)
        .map(|(_, ext)| *ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_extension() {
        assert_eq!(media_extension("image/jpeg"), Some("jpg"));
        assert_eq!(media_extension("IMAGE/PNG"), Some("png"));
        assert_eq!(media_extension("video/quicktime"), Some("mov"));
        assert_eq!(media_extension("image/gif; charset=binary"), Some("gif"));
        assert_eq!(media_extension("application/pdf"), None);
        assert_eq!(media_extension("image/webp"), None);
    }

    #[test]
    fn test_sort_key() {
        assert_eq!(BlogSort::from_key(Some("rank")), BlogSort::Rank);
        assert_eq!(BlogSort::from_key(Some("popularity")), BlogSort::Popularity);
        assert_eq!(BlogSort::from_key(Some("whatever")), BlogSort::Popularity);
        assert_eq!(BlogSort::from_key(None), BlogSort::Popularity);
    }

    #[test]
    fn test_list_query_defaults() {
        let query: BlogListQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.random);
        assert_eq!(query.pagination().page(), 1);
        assert_eq!(query.pagination().limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.sort(), BlogSort::Popularity);
    }

    #[test]
    fn test_random_list_meta_has_no_page() {
        let query: BlogListQuery =
            serde_json::from_str(r#"{"page": 4, "limit": 3, "random": true}"#).unwrap();
        let meta = query.meta(12);
        assert_eq!(meta.total, 12);
        assert_eq!(meta.page, None);
        assert_eq!(meta.limit, Some(3));

        let query: BlogListQuery = serde_json::from_str(r#"{"page": 4, "limit": 3}"#).unwrap();
        assert_eq!(query.meta(12).page, Some(4));
    }
}
