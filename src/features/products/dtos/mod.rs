mod product_dto;

pub use product_dto::{
    CategoryProductsDto, ProductCategoryDto, ProductFilterRequestDto, ProductForm,
    ProductFormDto, ProductResponseDto,
};
