use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::guards::RequireAdmin;
use crate::features::products::dtos::{
    CategoryProductsDto, ProductFilterRequestDto, ProductForm, ProductFormDto,
    ProductResponseDto,
};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, Meta};

async fn read_form(multipart: std::result::Result<Multipart, MultipartRejection>) -> Result<ProductForm> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    ProductForm::from_multipart(multipart).await
}

fn listing(
    products: Vec<ProductResponseDto>,
    message: &str,
) -> Json<ApiResponse<Vec<ProductResponseDto>>> {
    let meta = Meta::total(products.len());
    Json(ApiResponse::success(
        Some(products),
        Some(message.to_string()),
        Some(meta),
    ))
}

/// Create a product from a multipart form
#[utoipa::path(
    post,
    path = "/api/v1/products/create-product",
    request_body(content = ProductFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Missing or invalid field"),
        (status = 403, description = "Admin access required")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    _admin: RequireAdmin,
    State(service): State<Arc<ProductService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    let draft = read_form(multipart).await?.validated()?;
    let product = service.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(product, "Product created successfully")),
    ))
}

/// Update a product; without a photo the stored one is kept
#[utoipa::path(
    put,
    path = "/api/v1/products/{pid}",
    params(
        ("pid" = Uuid, Path, description = "Product ID")
    ),
    request_body(content = ProductFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Missing or invalid field"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    _admin: RequireAdmin,
    State(service): State<Arc<ProductService>>,
    AppPath(id): AppPath<Uuid>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let draft = read_form(multipart).await?.validated()?;
    let product = service.update(id, draft).await?;
    Ok(Json(ApiResponse::ok(product, "Product updated successfully")))
}

/// Latest products
#[utoipa::path(
    get,
    path = "/api/v1/products/get-product",
    responses(
        (status = 200, description = "Up to 12 newest products", body = ApiResponse<Vec<ProductResponseDto>>),
    ),
    tag = "products"
)]
pub async fn get_products(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.latest().await?;
    Ok(listing(products, "All products"))
}

/// Get product by slug
#[utoipa::path(
    get,
    path = "/api/v1/products/get-product/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::ok(product, "Single product fetched")))
}

/// Raw product photo
#[utoipa::path(
    get,
    path = "/api/v1/products/product-photo/{pid}",
    params(
        ("pid" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Photo bytes", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "Product or photo not found")
    ),
    tag = "products"
)]
pub async fn product_photo(
    State(service): State<Arc<ProductService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response> {
    let photo = service.photo(id).await?;
    Ok(([(header::CONTENT_TYPE, photo.content_type)], photo.data).into_response())
}

/// One page of products
#[utoipa::path(
    get,
    path = "/api/v1/products/product-list/{page}",
    params(
        ("page" = i64, Path, description = "Page number, starting at 1")
    ),
    responses(
        (status = 200, description = "Products on this page", body = ApiResponse<Vec<ProductResponseDto>>),
    ),
    tag = "products"
)]
pub async fn product_list(
    State(service): State<Arc<ProductService>>,
    AppPath(page): AppPath<i64>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.page(page).await?;
    Ok(listing(products, "Product page"))
}

/// Total number of products
#[utoipa::path(
    get,
    path = "/api/v1/products/product-count",
    responses(
        (status = 200, description = "Product count", body = ApiResponse<i64>),
    ),
    tag = "products"
)]
pub async fn product_count(
    State(service): State<Arc<ProductService>>,
) -> Result<Json<ApiResponse<i64>>> {
    let total = service.count().await?;
    Ok(Json(ApiResponse::success(
        Some(total),
        Some("Product count".to_string()),
        Some(Meta { total }),
    )))
}

/// Filter by categories and price range
#[utoipa::path(
    post,
    path = "/api/v1/products/product-filters",
    request_body = ProductFilterRequestDto,
    responses(
        (status = 200, description = "Matching products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "products"
)]
pub async fn product_filters(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<ProductFilterRequestDto>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.filter(dto.validated()?).await?;
    Ok(listing(products, "Filtered products"))
}

/// Search names and descriptions
#[utoipa::path(
    get,
    path = "/api/v1/products/search/{keyword}",
    params(
        ("keyword" = String, Path, description = "Text to look for")
    ),
    responses(
        (status = 200, description = "Matching products", body = ApiResponse<Vec<ProductResponseDto>>),
    ),
    tag = "products"
)]
pub async fn search_products(
    State(service): State<Arc<ProductService>>,
    Path(keyword): Path<String>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.search(&keyword).await?;
    Ok(listing(products, "Search results"))
}

/// Products in a category
#[utoipa::path(
    get,
    path = "/api/v1/products/product-category/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category with its products", body = ApiResponse<CategoryProductsDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "products"
)]
pub async fn product_category(
    State(service): State<Arc<ProductService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryProductsDto>>> {
    let result = service.by_category_slug(&slug).await?;
    let meta = Meta::total(result.products.len());
    Ok(Json(ApiResponse::success(
        Some(result),
        Some("Products by category".to_string()),
        Some(meta),
    )))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/products/{pid}",
    params(
        ("pid" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    _admin: RequireAdmin,
    State(service): State<Arc<ProductService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::message("Product Deleted Successfully")))
}
