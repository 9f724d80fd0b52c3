mod blog_dto;

pub use blog_dto::{
    media_extension, BlogDeleteResultDto, BlogListQuery, BlogResponseDto, BlogSearchQuery,
    BlogSort, BlogUpdateResultDto, CreateBlogDto, CreateBlogFormDto, MediaChanges, MediaUpload,
    SetMainMediaDto, SetRankDto, UpdateBlogDto, UpdateBlogFormDto, ALLOWED_MEDIA_TYPES,
};
