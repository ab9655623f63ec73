use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::guards::RequireAdmin;
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::services::{CategoryService, CreateOutcome};
use crate::shared::types::{ApiResponse, Meta};

/// Create a category
///
/// An existing name is answered with the stored record and `200`.
#[utoipa::path(
    post,
    path = "/api/v1/category/create-category",
    request_body = CategoryRequestDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 200, description = "Category already exists", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Name is required"),
        (status = 403, description = "Admin access required")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    _admin: RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let name = dto.validated()?;

    let response = match service.create(&name).await? {
        CreateOutcome::Created(category) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(category, "New category created")),
        ),
        CreateOutcome::Existing(category) => (
            StatusCode::OK,
            Json(ApiResponse::ok(category, "Category already exists")),
        ),
    };
    Ok(response)
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/v1/category",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list().await?;
    let meta = Meta::total(categories.len());
    Ok(Json(ApiResponse::success(
        Some(categories),
        Some("All categories list".to_string()),
        Some(meta),
    )))
}

/// Get category by slug
#[utoipa::path(
    get,
    path = "/api/v1/category/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::ok(
        category,
        "Get single category successful",
    )))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/api/v1/category/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = CategoryRequestDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Name is required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    _admin: RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let name = dto.validated()?;
    let category = service.update(id, &name).await?;
    Ok(Json(ApiResponse::ok(
        category,
        "Category updated successfully",
    )))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/v1/category/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    _admin: RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::message("Category deleted successfully")))
}
