/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Super admin role - the only role allowed to delete blogs
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Admin role - can author and edit categories and blogs
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// UPLOADS
// =============================================================================

/// Directory (relative to the upload base dir) where blog media is written
pub const BLOG_UPLOAD_DIR: &str = "uploads/blog";

/// URL prefix under which the `uploads/` directory is served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Maximum number of files accepted per multipart file field
pub const MAX_MEDIA_FILES_PER_FIELD: usize = 5;
