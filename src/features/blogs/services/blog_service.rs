use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use rand::Rng;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::error::{map_fk_violation, AppError, Result};
use crate::features::blogs::dtos::{
    BlogDeleteResultDto, BlogResponseDto, BlogSort, BlogUpdateResultDto, CreateBlogDto,
    MediaChanges, MediaUpload, UpdateBlogDto,
};
use crate::features::blogs::media_edit::{self, MediaEdit};
use crate::features::blogs::models::{Blog, Media};
use crate::modules::storage::LocalFileStore;
use crate::shared::types::PaginationQuery;

const BLOG_COLUMNS: &str = "id, title, content, external_link, message_link, rank, view, \
                            main_media, category_id, admin_id, created_at, updated_at";

const CATEGORY_NOT_FOUND: &str = "Category not found";

/// Escape `%`, `_` and `\` so user input matches literally inside a LIKE pattern
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `min(limit, total)` distinct offsets in `0..total`, drawn without replacement
pub fn random_offsets<R: Rng + ?Sized>(rng: &mut R, total: usize, limit: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, total, limit.min(total)).into_vec()
}

/// Rows removed by a category cascade
#[derive(Debug, Default)]
pub struct PurgedBlogs {
    pub blog_count: i64,
    pub media_paths: Vec<String>,
}

/// An upload with its destination already chosen
struct StagedUpload {
    path: String,
    data: Bytes,
}

/// Service for blog posts and their media
pub struct BlogService {
    pool: PgPool,
    file_store: Arc<LocalFileStore>,
}

impl BlogService {
    pub fn new(pool: PgPool, file_store: Arc<LocalFileStore>) -> Self {
        Self { pool, file_store }
    }

    fn stage(&self, uploads: Vec<MediaUpload>) -> Vec<StagedUpload> {
        uploads
            .into_iter()
            .map(|upload| StagedUpload {
                path: self.file_store.allocate_path(upload.extension),
                data: upload.data,
            })
            .collect()
    }

    /// Write staged uploads. On failure everything written so far is removed again.
    async fn write_uploads(&self, uploads: &[&StagedUpload]) -> Result<()> {
        let mut written: Vec<&str> = Vec::with_capacity(uploads.len());

        for upload in uploads {
            written.push(&upload.path);
            if let Err(e) = self.file_store.write(&upload.path, &upload.data).await {
                self.file_store.delete_many(&written).await;
                return Err(e.into());
            }
        }

        Ok(())
    }

    /// Remove files written by a request whose database work failed
    async fn discard_uploads(&self, paths: &[String]) {
        let failed = self.file_store.delete_many(paths).await;
        if !failed.is_empty() {
            tracing::warn!("Could not clean up {} uploaded file(s)", failed.len());
        }
    }

    /// Paths of the given blogs' media in slot order, keyed by blog
    async fn load_medias(&self, blog_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<String>>> {
        let rows = sqlx::query_as::<_, Media>(
            "SELECT id, blog_id, path, position, created_at FROM media \
             WHERE blog_id = ANY($1) ORDER BY blog_id, position",
        )
        .bind(blog_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut medias: HashMap<Uuid, Vec<String>> = HashMap::new();
        for media in rows {
            medias.entry(media.blog_id).or_default().push(media.path);
        }
        Ok(medias)
    }

    async fn with_medias(&self, blogs: Vec<Blog>) -> Result<Vec<BlogResponseDto>> {
        let ids: Vec<Uuid> = blogs.iter().map(|b| b.id).collect();
        let mut medias = self.load_medias(&ids).await?;

        Ok(blogs
            .into_iter()
            .map(|blog| {
                let paths = medias.remove(&blog.id).unwrap_or_default();
                BlogResponseDto::from_blog(blog, paths)
            })
            .collect())
    }

    async fn media_paths(conn: &mut PgConnection, blog_id: Uuid) -> Result<Vec<String>> {
        let paths = sqlx::query_scalar::<_, String>(
            "SELECT path FROM media WHERE blog_id = $1 ORDER BY position",
        )
        .bind(blog_id)
        .fetch_all(conn)
        .await?;

        Ok(paths)
    }

    async fn replace_media_rows(
        conn: &mut PgConnection,
        blog_id: Uuid,
        paths: &[String],
    ) -> Result<()> {
        sqlx::query("DELETE FROM media WHERE blog_id = $1")
            .bind(blog_id)
            .execute(&mut *conn)
            .await?;

        for (position, path) in paths.iter().enumerate() {
            sqlx::query("INSERT INTO media (blog_id, path, position) VALUES ($1, $2, $3)")
                .bind(blog_id)
                .bind(path)
                .bind(position as i32)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    async fn lock_blog(conn: &mut PgConnection, id: Uuid) -> Result<Blog> {
        let query = format!("SELECT {} FROM blogs WHERE id = $1 FOR UPDATE", BLOG_COLUMNS);

        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog with id {} not found", id)))
    }

    /// Create a blog authored by `admin_id`.
    ///
    /// The category must have been checked by the caller. Uploads are stored
    /// in the order given.
    pub async fn create(
        &self,
        dto: CreateBlogDto,
        admin_id: &str,
        uploads: Vec<MediaUpload>,
        main_media_index: Option<i64>,
    ) -> Result<BlogResponseDto> {
        let staged = self.stage(uploads);
        let paths: Vec<String> = staged.iter().map(|u| u.path.clone()).collect();
        let main_media = media_edit::select_main_media(&paths, main_media_index);

        self.write_uploads(&staged.iter().collect::<Vec<_>>()).await?;

        match self.insert_blog(&dto, admin_id, &paths, main_media).await {
            Ok(blog) => {
                tracing::info!(
                    "Blog created: {} ({}) by {} with {} media",
                    blog.title,
                    blog.id,
                    admin_id,
                    paths.len()
                );
                Ok(BlogResponseDto::from_blog(blog, paths))
            }
            Err(e) => {
                self.discard_uploads(&paths).await;
                Err(e)
            }
        }
    }

    async fn insert_blog(
        &self,
        dto: &CreateBlogDto,
        admin_id: &str,
        paths: &[String],
        main_media: Option<String>,
    ) -> Result<Blog> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            INSERT INTO blogs (title, content, external_link, message_link, rank, main_media, category_id, admin_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            BLOG_COLUMNS
        );

        let blog = sqlx::query_as::<_, Blog>(&query)
            .bind(dto.title.trim())
            .bind(&dto.content)
            .bind(&dto.external_link)
            .bind(&dto.message_link)
            .bind(dto.rank.unwrap_or(0))
            .bind(main_media)
            .bind(dto.category_id)
            .bind(admin_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_fk_violation(e, CATEGORY_NOT_FOUND))?;

        Self::replace_media_rows(&mut *tx, blog.id, paths).await?;
        tx.commit().await?;

        Ok(blog)
    }

    /// Public detail view; counts one view per call
    pub async fn view(&self, id: Uuid) -> Result<BlogResponseDto> {
        let query = format!(
            "UPDATE blogs SET view = view + 1 WHERE id = $1 RETURNING {}",
            BLOG_COLUMNS
        );

        let blog = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog with id {} not found", id)))?;

        let medias = self.load_medias(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(BlogResponseDto::from_blog(blog, medias))
    }

    /// Sorted page of blogs, or `limit` random ones. Always returns the
    /// number of blogs in the collection.
    pub async fn list(
        &self,
        sort: BlogSort,
        pagination: &PaginationQuery,
        random: bool,
    ) -> Result<(Vec<BlogResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blogs")
            .fetch_one(&self.pool)
            .await?;

        let blogs = if random {
            self.sample(total, pagination.limit()).await?
        } else {
            let query = format!(
                "SELECT {} FROM blogs ORDER BY {} LIMIT $1 OFFSET $2",
                BLOG_COLUMNS,
                sort.order_by()
            );

            sqlx::query_as::<_, Blog>(&query)
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list blogs: {:?}", e);
                    AppError::Database(e)
                })?
        };

        Ok((self.with_medias(blogs).await?, total))
    }

    async fn sample(&self, total: i64, limit: i64) -> Result<Vec<Blog>> {
        let offsets = random_offsets(&mut rand::rng(), total.max(0) as usize, limit as usize);
        tracing::debug!("Sampling {} of {} blogs", offsets.len(), total);

        let query = format!(
            "SELECT {} FROM blogs ORDER BY created_at, id OFFSET $1 LIMIT 1",
            BLOG_COLUMNS
        );

        let mut blogs = Vec::with_capacity(offsets.len());
        for offset in offsets {
            // a concurrent delete can leave an offset past the end
            if let Some(blog) = sqlx::query_as::<_, Blog>(&query)
                .bind(offset as i64)
                .fetch_optional(&self.pool)
                .await?
            {
                blogs.push(blog);
            }
        }

        Ok(blogs)
    }

    /// Case-insensitive title search. A blank term matches nothing.
    pub async fn search(
        &self,
        term: &str,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<BlogResponseDto>, i64)> {
        let term = term.trim();
        if term.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let pattern = format!("%{}%", escape_like(term));

        let total = sqlx::query_scalar::<_, i64>(
            r"SELECT COUNT(*) FROM blogs WHERE title ILIKE $1 ESCAPE '\'",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            r"SELECT {} FROM blogs WHERE title ILIKE $1 ESCAPE '\' ORDER BY created_at DESC, id LIMIT $2 OFFSET $3",
            BLOG_COLUMNS
        );

        let blogs = sqlx::query_as::<_, Blog>(&query)
            .bind(&pattern)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((self.with_medias(blogs).await?, total))
    }

    /// Blogs of one category, newest first
    pub async fn list_by_category(
        &self,
        category_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<BlogResponseDto>, i64)> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blogs WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;

        let query = format!(
            "SELECT {} FROM blogs WHERE category_id = $1 ORDER BY created_at DESC, id LIMIT $2 OFFSET $3",
            BLOG_COLUMNS
        );

        let blogs = sqlx::query_as::<_, Blog>(&query)
            .bind(category_id)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((self.with_medias(blogs).await?, total))
    }

    /// Merge scalar fields and reconcile media in one locked transaction.
    ///
    /// New files are written before commit and removed again if the
    /// transaction fails. Replaced and removed files are deleted after commit.
    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateBlogDto,
        changes: MediaChanges,
    ) -> Result<BlogUpdateResultDto> {
        let mut tx = self.pool.begin().await?;
        let blog = Self::lock_blog(&mut *tx, id).await?;

        if let Some(category_id) = dto.category_id.filter(|c| *c != blog.category_id) {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
            )
            .bind(category_id)
            .fetch_one(&mut *tx)
            .await?;

            if !exists {
                return Err(AppError::NotFound(CATEGORY_NOT_FOUND.to_string()));
            }
        }

        let current = Self::media_paths(&mut *tx, id).await?;

        let replacements = self.stage(changes.replacements);
        let appended = self.stage(changes.appended);
        let edit = MediaEdit {
            replacements: replacements.iter().map(|u| u.path.clone()).collect(),
            replace_indices: changes.replace_indices,
            remove_indices: changes.remove_indices,
            appended: appended.iter().map(|u| u.path.clone()).collect(),
            main_media_index: changes.main_media_index,
        };
        let media_changed = !edit.is_empty();
        let plan = media_edit::plan(&current, blog.main_media.as_deref(), &edit)?;

        let to_write: Vec<&StagedUpload> = replacements
            .iter()
            .chain(&appended)
            .filter(|u| plan.uploads_to_write.contains(&u.path))
            .collect();
        self.write_uploads(&to_write).await?;

        let medias = media_changed.then_some(plan.medias.as_slice());
        let persisted =
            Self::persist_update(tx, id, &dto, plan.main_media.as_deref(), medias).await;

        let updated = match persisted {
            Ok(blog) => blog,
            Err(e) => {
                self.discard_uploads(&plan.uploads_to_write).await;
                return Err(e);
            }
        };

        let unremoved_files = self.file_store.delete_many(&plan.removed).await;
        if !unremoved_files.is_empty() {
            tracing::warn!(
                "Blog {} updated but {} old media file(s) remain on disk",
                id,
                unremoved_files.len()
            );
        }

        tracing::info!(
            "Blog updated: {} (+{} media, -{} media)",
            id,
            plan.uploads_to_write.len(),
            plan.removed.len()
        );

        Ok(BlogUpdateResultDto {
            blog: BlogResponseDto::from_blog(updated, plan.medias),
            unremoved_files,
        })
    }

    async fn persist_update(
        mut tx: Transaction<'_, Postgres>,
        id: Uuid,
        dto: &UpdateBlogDto,
        main_media: Option<&str>,
        medias: Option<&[String]>,
    ) -> Result<Blog> {
        let query = format!(
            r#"
            UPDATE blogs
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                external_link = COALESCE($4, external_link),
                message_link = COALESCE($5, message_link),
                rank = COALESCE($6, rank),
                category_id = COALESCE($7, category_id),
                main_media = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BLOG_COLUMNS
        );

        let updated = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(&dto.content)
            .bind(&dto.external_link)
            .bind(&dto.message_link)
            .bind(dto.rank)
            .bind(dto.category_id)
            .bind(main_media)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_fk_violation(e, CATEGORY_NOT_FOUND))?;

        if let Some(medias) = medias {
            Self::replace_media_rows(&mut *tx, id, medias).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn set_rank(&self, id: Uuid, rank: i32) -> Result<BlogResponseDto> {
        let query = format!(
            "UPDATE blogs SET rank = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            BLOG_COLUMNS
        );

        let blog = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(rank)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog with id {} not found", id)))?;

        tracing::info!("Blog {} rank set to {}", id, rank);

        let medias = self.load_medias(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(BlogResponseDto::from_blog(blog, medias))
    }

    /// Make the media at `index` the blog's primary media
    pub async fn set_main_media(&self, id: Uuid, index: i64) -> Result<BlogResponseDto> {
        let mut tx = self.pool.begin().await?;
        Self::lock_blog(&mut *tx, id).await?;

        let medias = Self::media_paths(&mut *tx, id).await?;
        let path = usize::try_from(index)
            .ok()
            .and_then(|i| medias.get(i))
            .cloned()
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid media index: {} (blog has {} media)",
                    index,
                    medias.len()
                ))
            })?;

        let query = format!(
            "UPDATE blogs SET main_media = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            BLOG_COLUMNS
        );
        let blog = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(&path)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("Blog {} main media set to {}", id, path);
        Ok(BlogResponseDto::from_blog(blog, medias))
    }

    /// Delete a blog with its media rows, then its files
    pub async fn delete(&self, id: Uuid) -> Result<BlogDeleteResultDto> {
        let mut tx = self.pool.begin().await?;
        let blog = Self::lock_blog(&mut *tx, id).await?;

        let medias = Self::media_paths(&mut *tx, id).await?;

        sqlx::query("DELETE FROM media WHERE blog_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let unremoved_files = self.file_store.delete_many(&medias).await;
        if !unremoved_files.is_empty() {
            tracing::warn!(
                "Blog {} deleted but {} media file(s) remain on disk",
                id,
                unremoved_files.len()
            );
        }

        tracing::info!("Blog deleted: {} ({} media)", id, medias.len());

        Ok(BlogDeleteResultDto {
            blog: BlogResponseDto::from_blog(blog, medias),
            unremoved_files,
        })
    }

    /// Delete every blog in the given categories together with their media
    /// rows, inside the caller's transaction. Returns the media paths so the
    /// caller can remove the files once committed.
    pub async fn delete_by_categories(
        &self,
        conn: &mut PgConnection,
        category_ids: &[Uuid],
    ) -> Result<PurgedBlogs> {
        let media_paths = sqlx::query_scalar::<_, String>(
            "DELETE FROM media WHERE blog_id IN \
             (SELECT id FROM blogs WHERE category_id = ANY($1)) RETURNING path",
        )
        .bind(category_ids)
        .fetch_all(&mut *conn)
        .await?;

        let result = sqlx::query("DELETE FROM blogs WHERE category_id = ANY($1)")
            .bind(category_ids)
            .execute(&mut *conn)
            .await?;

        Ok(PurgedBlogs {
            blog_count: result.rows_affected() as i64,
            media_paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    use crate::shared::test_helpers::TestServices;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), r"100\%");
        assert_eq!(escape_like("snake_case"), r"snake\_case");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn test_random_offsets_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let offsets = random_offsets(&mut rng, 10, 10);
            let unique: HashSet<_> = offsets.iter().collect();
            assert_eq!(offsets.len(), 10);
            assert_eq!(unique.len(), 10);
            assert!(offsets.iter().all(|o| *o < 10));
        }
    }

    #[test]
    fn test_random_offsets_never_exceed_total() {
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(random_offsets(&mut rng, 3, 20).len(), 3);
        assert!(random_offsets(&mut rng, 0, 5).is_empty());
        assert_eq!(random_offsets(&mut rng, 100, 4).len(), 4);
    }

    #[tokio::test]
    async fn test_each_detail_fetch_counts_one_view() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };
        let category = ctx.category("Views", None).await;
        let blog = ctx.blog(category, 0, 0).await;
        assert_eq!(blog.view, 0);

        let first = ctx.blogs.view(blog.id).await.unwrap();
        let second = ctx.blogs.view(blog.id).await.unwrap();

        assert_eq!(first.view, 1);
        assert_eq!(second.view, 2);
    }

    #[tokio::test]
    async fn test_detail_of_missing_blog_is_not_found() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };

        let result = ctx.blogs.view(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_sort_orders() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };
        let category = ctx.category("Sorting", None).await;
        for (rank, views) in [(3, 5_i64), (1, 40), (2, 12)] {
            let blog = ctx.blog(category, rank, 0).await;
            sqlx::query("UPDATE blogs SET view = $2 WHERE id = $1")
                .bind(blog.id)
                .bind(views)
                .execute(&ctx.pool)
                .await
                .unwrap();
        }
        let page = PaginationQuery::new(1, 100);

        let (by_rank, total) = ctx.blogs.list(BlogSort::Rank, &page, false).await.unwrap();
        assert!(total >= 3);
        assert!(by_rank.windows(2).all(|w| w[0].rank <= w[1].rank));

        let (by_views, _) = ctx
            .blogs
            .list(BlogSort::Popularity, &page, false)
            .await
            .unwrap();
        assert!(by_views.windows(2).all(|w| w[0].view >= w[1].view));
    }

    #[tokio::test]
    async fn test_random_list_returns_distinct_blogs() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };
        let category = ctx.category("Random", None).await;
        for rank in 0..3 {
            ctx.blog(category, rank, 0).await;
        }

        let (blogs, total) = ctx
            .blogs
            .list(BlogSort::Popularity, &PaginationQuery::new(1, 3), true)
            .await
            .unwrap();

        assert!(total >= 3);
        let ids: HashSet<Uuid> = blogs.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), blogs.len());
        assert!(blogs.len() <= 3);
    }

    #[tokio::test]
    async fn test_huge_page_is_empty_not_an_error() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };

        let (blogs, _) = ctx
            .blogs
            .list(BlogSort::Rank, &PaginationQuery::new(i64::MAX, 20), false)
            .await
            .unwrap();
        assert!(blogs.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_rows_and_files() {
        let Some(ctx) = TestServices::connect().await else {
            return;
        };
        let category = ctx.category("Deletion", None).await;
        let blog = ctx.blog(category, 0, 2).await;
        assert_eq!(blog.medias.len(), 2);
        assert!(blog.medias.iter().all(|path| ctx.file_exists(path)));
        assert_eq!(blog.main_media.as_ref(), blog.medias.first());

        let result = ctx.blogs.delete(blog.id).await.unwrap();

        assert_eq!(result.blog.id, blog.id);
        assert!(result.unremoved_files.is_empty());
        assert!(!ctx.blog_exists(blog.id).await);
        assert_eq!(ctx.media_rows(blog.id).await, 0);
        assert!(blog.medias.iter().all(|path| !ctx.file_exists(path)));
    }
}
