use std::str::FromStr;

use axum::extract::Multipart;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::products::models::{
    ProductDraft, ProductFilter, ProductPhoto, ProductWithCategory,
};
use crate::shared::constants::{MAX_PHOTO_SIZE, MAX_PRICE_CENTS};
use crate::shared::slug::slugify;
use crate::shared::validation::{FieldError, Rules};

const PHOTO_TOO_LARGE: &str = "Photo is required and should be less than 1mb";

const DEFAULT_PHOTO_TYPE: &str = "application/octet-stream";

/// Largest value a NUMERIC(12, 2) column holds
/// Multipart form for product create and update (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProductFormDto {
    pub name: String,
    pub description: String,
    /// Non-negative decimal, two fraction digits are kept
    pub price: String,
    /// Category id
    pub category: Uuid,
    pub quantity: i32,
    /// At most 1 000 000 bytes
    #[schema(value_type = Option<String>, format = Binary)]
    pub photo: Option<Vec<u8>>,
}

/// Raw multipart fields, before validation
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub photo: Option<ProductPhoto>,
}

impl ProductForm {
    /// Collect the known fields; unknown fields are drained and ignored
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = ProductForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "photo" => {
                    let content_type = field
                        .content_type()
                        .unwrap_or(DEFAULT_PHOTO_TYPE)
                        .to_string();
                    let data = field.bytes().await.map_err(multipart_error)?;
                    if !data.is_empty() {
                        form.photo = Some(ProductPhoto {
                            data: data.to_vec(),
                            content_type,
                        });
                    }
                }
                "name" | "description" | "price" | "category" | "quantity" => {
                    let value = field.text().await.map_err(multipart_error)?;
                    let slot = match name.as_str() {
                        "name" => &mut form.name,
                        "description" => &mut form.description,
                        "price" => &mut form.price,
                        "category" => &mut form.category,
                        _ => &mut form.quantity,
                    };
                    *slot = Some(value);
                }
                _ => {
                    field.bytes().await.map_err(multipart_error)?;
                }
            }
        }

        Ok(form)
    }

    /// Required fields in order, then the photo size, then typed parsing
    pub fn validated(self) -> Result<ProductDraft> {
        Rules::new()
            .required("name", "Name", self.name.as_deref())
            .required("description", "Description", self.description.as_deref())
            .required("price", "Price", self.price.as_deref())
            .required("category", "Category", self.category.as_deref())
            .required("quantity", "Quantity", self.quantity.as_deref())
            .max_bytes(
                "photo",
                MAX_PHOTO_SIZE,
                self.photo.as_ref().map(|p| p.data.len()),
                PHOTO_TOO_LARGE,
            )
            .check()?;

        let price = parse_price(self.price.as_deref().unwrap_or_default())?;
        let quantity = parse_quantity(self.quantity.as_deref().unwrap_or_default())?;
        let category_id = Uuid::parse_str(self.category.as_deref().unwrap_or_default().trim())
            .map_err(|_| FieldError::invalid("category", "Category must be a valid id"))?;

        let name = self.name.unwrap_or_default().trim().to_string();
        Ok(ProductDraft {
            slug: slugify(&name),
            name,
            description: self.description.unwrap_or_default().trim().to_string(),
            price,
            quantity,
            category_id,
            photo: self.photo,
        })
    }
}

/// The photo is the only field that can push a form past the body limit
fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(PHOTO_TOO_LARGE.to_string());
    }
    AppError::BadRequest(format!("Invalid multipart form: {}", err.body_text()))
}

fn parse_price(raw: &str) -> std::result::Result<Decimal, FieldError> {
    let invalid = || FieldError::invalid("price", "Price must be a non-negative number");
    let price = Decimal::from_str(raw.trim()).map_err(|_| invalid())?;
    if price.is_sign_negative() || price > Decimal::new(MAX_PRICE_CENTS, 2) {
        return Err(invalid());
    }
    Ok(price.round_dp(2))
}

fn parse_quantity(raw: &str) -> std::result::Result<i32, FieldError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|q| *q >= 0)
        .ok_or_else(|| FieldError::invalid("quantity", "Quantity must be a non-negative integer"))
}

/// Category as embedded in a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductCategoryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Response DTO for product; the photo is served separately
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: Uuid,
    /// `null` when the category was deleted
    pub category: Option<ProductCategoryDto>,
    pub has_photo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductWithCategory> for ProductResponseDto {
    fn from(row: ProductWithCategory) -> Self {
        let p = row.product;
        let category = match (row.category_name, row.category_slug) {
            (Some(name), Some(slug)) => Some(ProductCategoryDto {
                id: p.category_id,
                name,
                slug,
            }),
            _ => None,
        };

        Self {
            id: p.id,
            name: p.name,
            slug: p.slug,
            description: p.description,
            price: p.price,
            quantity: p.quantity,
            category_id: p.category_id,
            category,
            has_photo: p.has_photo,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Request DTO for the filter listing
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductFilterRequestDto {
    /// Category ids; empty means any category
    #[serde(default)]
    pub checked: Vec<Uuid>,

    /// `[min, max]` inclusive; empty means any price
    #[serde(default)]
    #[schema(value_type = Vec<f64>)]
    pub radio: Vec<Decimal>,
}

impl ProductFilterRequestDto {
    pub fn validated(self) -> Result<ProductFilter> {
        let price_range = match self.radio.as_slice() {
            [] => None,
            [min, max] => Some((*min, *max)),
            _ => {
                return Err(FieldError::invalid(
                    "radio",
                    "Price range must have exactly two values",
                )
                .into())
            }
        };

        Ok(ProductFilter {
            categories: self.checked,
            price_range,
        })
    }
}

/// Products of one category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryProductsDto {
    pub category: CategoryResponseDto,
    pub products: Vec<ProductResponseDto>,
}
