mod category_dto;

pub use category_dto::{
    CategoryDeleteResultDto, CategoryDetailDto, CategoryResponseDto, CategoryTreeDto,
    CreateCategoryDto, CreateSubCategoryDto, UpdateCategoryDto,
};
