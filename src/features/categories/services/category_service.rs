use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_fk_violation, AppError, Result};
use crate::features::blogs::services::BlogService;
use crate::features::categories::dtos::{
    CategoryDeleteResultDto, CategoryDetailDto, CategoryResponseDto, CategoryTreeDto,
    CreateCategoryDto, CreateSubCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{Category, CategoryLink};
use crate::features::categories::tree;
use crate::modules::storage::LocalFileStore;
use crate::shared::types::PaginationQuery;

const CATEGORY_COLUMNS: &str =
    "id, name, description, parent_category_id, created_at, updated_at";

const PARENT_NOT_FOUND: &str = "Parent category not found";

/// Service for the category tree
pub struct CategoryService {
    pool: PgPool,
    blogs: Arc<BlogService>,
    file_store: Arc<LocalFileStore>,
}

impl CategoryService {
    pub fn new(pool: PgPool, blogs: Arc<BlogService>, file_store: Arc<LocalFileStore>) -> Self {
        Self {
            pool,
            blogs,
            file_store,
        }
    }

    /// Insert a root or child category.
    ///
    /// The parent is not looked up first; a dangling reference is caught by
    /// the foreign key.
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let query = format!(
            "INSERT INTO categories (name, description, parent_category_id) \
             VALUES ($1, $2, $3) RETURNING {}",
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(dto.name.trim())
            .bind(&dto.description)
            .bind(dto.parent_category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, PARENT_NOT_FOUND))?;

        tracing::info!(
            "Category created: {} ({}) parent={:?}",
            category.name,
            category.id,
            category.parent_category_id
        );

        Ok(category.into())
    }

    /// Insert a child under an existing category
    pub async fn create_subcategory(
        &self,
        dto: CreateSubCategoryDto,
    ) -> Result<CategoryResponseDto> {
        if !self.exists(dto.parent_category_id).await? {
            return Err(AppError::NotFound(PARENT_NOT_FOUND.to_string()));
        }

        self.create(CreateCategoryDto {
            name: dto.name,
            description: dto.description,
            parent_category_id: Some(dto.parent_category_id),
        })
        .await
    }

    /// Whole tree, roots first, children nested under `sub_categories`
    pub async fn find_all(&self) -> Result<Vec<CategoryTreeDto>> {
        let query = format!(
            "SELECT {} FROM categories ORDER BY created_at, name",
            CATEGORY_COLUMNS
        );

        let categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(tree::build_forest(categories))
    }

    /// Root categories only
    pub async fn find_parents(&self) -> Result<Vec<CategoryResponseDto>> {
        self.find_where("parent_category_id IS NULL").await
    }

    /// Every category that has a parent
    pub async fn find_sub_categories(&self) -> Result<Vec<CategoryResponseDto>> {
        self.find_where("parent_category_id IS NOT NULL").await
    }

    async fn find_where(&self, condition: &str) -> Result<Vec<CategoryResponseDto>> {
        let query = format!(
            "SELECT {} FROM categories WHERE {} ORDER BY created_at, name",
            CATEGORY_COLUMNS, condition
        );

        let categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Category plus one page of its blogs, newest first. Returns the total
    /// number of blogs in the category alongside.
    pub async fn detail(
        &self,
        id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(CategoryDetailDto, i64)> {
        let category = self.find_by_id(id).await?;
        let (blogs, total) = self.blogs.list_by_category(id, pagination).await?;

        Ok((CategoryDetailDto { category, blogs }, total))
    }

    /// Merge the provided fields into the category
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM categories WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        if let Some(Some(new_parent)) = dto.parent_category_id {
            let links = sqlx::query_as::<_, CategoryLink>(
                "SELECT id, parent_category_id FROM categories",
            )
            .fetch_all(&mut *tx)
            .await?;

            if !links.iter().any(|link| link.id == new_parent) {
                return Err(AppError::NotFound(PARENT_NOT_FOUND.to_string()));
            }

            if tree::is_in_subtree(new_parent, id, &links) {
                return Err(AppError::Validation(
                    "A category cannot be moved under itself or one of its descendants"
                        .to_string(),
                ));
            }
        }

        let (parent_changed, new_parent) = match dto.parent_category_id {
            Some(parent) => (true, parent),
            None => (false, None),
        };

        let query = format!(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                parent_category_id = CASE WHEN $4 THEN $5 ELSE parent_category_id END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(&dto.description)
            .bind(parent_changed)
            .bind(new_parent)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_fk_violation(e, PARENT_NOT_FOUND))?;

        tx.commit().await?;

        tracing::info!("Category updated: {}", id);
        Ok(category.into())
    }

    /// Delete a category with all of its descendants, their blogs and the
    /// blogs' media.
    ///
    /// Rows go in one transaction. Media files are removed after commit and
    /// any that could not be removed are reported back.
    pub async fn delete(&self, id: Uuid) -> Result<CategoryDeleteResultDto> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "SELECT {} FROM categories WHERE id = $1 FOR UPDATE",
            CATEGORY_COLUMNS
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        let links =
            sqlx::query_as::<_, CategoryLink>("SELECT id, parent_category_id FROM categories")
                .fetch_all(&mut *tx)
                .await?;

        let subtree = tree::collect_subtree(id, &links);
        let purged = self.blogs.delete_by_categories(&mut *tx, &subtree).await?;

        for category_id in &subtree {
            sqlx::query("DELETE FROM categories WHERE id = $1")
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let unremoved_files = self.file_store.delete_many(&purged.media_paths).await;
        if !unremoved_files.is_empty() {
            tracing::warn!(
                "Category {} deleted but {} media file(s) remain on disk",
                id,
                unremoved_files.len()
            );
        }

        tracing::info!(
            "Category deleted: {} ({} categories, {} blogs, {} media)",
            id,
            subtree.len(),
            purged.blog_count,
            purged.media_paths.len()
        );

        Ok(CategoryDeleteResultDto {
            category: category.into(),
            deleted_category_ids: subtree,
            deleted_blog_count: purged.blog_count,
            deleted_media_count: purged.media_paths.len() as i64,
            unremoved_files,
        })
    }
}
