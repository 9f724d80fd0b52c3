use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::blogs::{dtos as blogs_dtos, handlers as blogs_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::feedback::{dtos as feedback_dtos, handlers as feedback_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (protected)
        categories_handlers::create_category,
        categories_handlers::create_sub_category,
        categories_handlers::list_categories,
        categories_handlers::list_parent_categories,
        categories_handlers::list_sub_categories,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Blogs (public reads)
        blogs_handlers::list_blogs,
        blogs_handlers::search_blogs,
        blogs_handlers::get_blog,
        // Blogs (protected)
        blogs_handlers::create_blog,
        blogs_handlers::update_blog,
        blogs_handlers::set_rank,
        blogs_handlers::set_main_media,
        blogs_handlers::delete_blog,
        // Feedback
        feedback_handlers::create_feedback,
        feedback_handlers::list_feedback,
        feedback_handlers::delete_feedback,
    ),
    components(
        schemas(
            Meta,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<Vec<categories_dtos::CategoryTreeDto>>,
            ApiResponse<categories_dtos::CategoryDetailDto>,
            ApiResponse<categories_dtos::CategoryDeleteResultDto>,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CategoryDetailDto,
            categories_dtos::CategoryDeleteResultDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::CreateSubCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<blogs_dtos::BlogResponseDto>,
            ApiResponse<Vec<blogs_dtos::BlogResponseDto>>,
            ApiResponse<blogs_dtos::BlogUpdateResultDto>,
            ApiResponse<blogs_dtos::BlogDeleteResultDto>,
            blogs_dtos::BlogResponseDto,
            blogs_dtos::BlogUpdateResultDto,
            blogs_dtos::BlogDeleteResultDto,
            blogs_dtos::CreateBlogFormDto,
            blogs_dtos::UpdateBlogFormDto,
            blogs_dtos::SetRankDto,
            blogs_dtos::SetMainMediaDto,
            ApiResponse<feedback_dtos::FeedbackResponseDto>,
            ApiResponse<Vec<feedback_dtos::FeedbackResponseDto>>,
            feedback_dtos::FeedbackResponseDto,
            feedback_dtos::CreateFeedbackDto,
        )
    ),
    tags(
        (name = "categories", description = "Category tree management"),
        (name = "blogs", description = "Blog posts and their media"),
        (name = "feedback", description = "Visitor feedback"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "ContentHub API",
        version = "0.1.0",
        description = "API documentation for ContentHub",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
