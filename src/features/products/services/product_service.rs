use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::CategoryRepository;
use crate::features::products::dtos::{CategoryProductsDto, ProductResponseDto};
use crate::features::products::models::{ProductDraft, ProductFilter, ProductPhoto};
use crate::features::products::repositories::ProductRepository;
use crate::shared::constants::{LATEST_PRODUCTS_LIMIT, PRODUCT_PAGE_SIZE};
use crate::shared::types::Page;

/// Service for the product catalog
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Product {} not found", id))
}

fn into_dtos<T: Into<ProductResponseDto>>(rows: Vec<T>) -> Vec<ProductResponseDto> {
    rows.into_iter().map(Into::into).collect()
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<ProductResponseDto> {
        let product = self.products.insert(draft).await?;
        tracing::info!("Product created: {}", product.product.id);
        Ok(product.into())
    }

    pub async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<ProductResponseDto> {
        let product = self
            .products
            .update(id, draft)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Product updated: {}", id);
        Ok(product.into())
    }

    /// The most recently created products
    pub async fn latest(&self) -> Result<Vec<ProductResponseDto>> {
        let rows = self.products.latest(LATEST_PRODUCTS_LIMIT).await?;
        Ok(into_dtos(rows))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<ProductResponseDto> {
        self.products
            .find_by_slug(slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", slug)))
    }

    pub async fn photo(&self, id: Uuid) -> Result<ProductPhoto> {
        self.products
            .photo(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No photo for product {}", id)))
    }

    /// Fixed-size page, newest first
    pub async fn page(&self, number: i64) -> Result<Vec<ProductResponseDto>> {
        let rows = self
            .products
            .page(Page::new(number, PRODUCT_PAGE_SIZE))
            .await?;
        Ok(into_dtos(rows))
    }

    pub async fn count(&self) -> Result<i64> {
        self.products.count().await
    }

    pub async fn filter(&self, filter: ProductFilter) -> Result<Vec<ProductResponseDto>> {
        let rows = self.products.filter(&filter).await?;
        Ok(into_dtos(rows))
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<ProductResponseDto>> {
        let rows = self.products.search(keyword).await?;
        Ok(into_dtos(rows))
    }

    /// Products whose category reference matches the category with `slug`
    pub async fn by_category_slug(&self, slug: &str) -> Result<CategoryProductsDto> {
        let category = self
            .categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

        let rows = self.products.by_category(category.id).await?;
        Ok(CategoryProductsDto {
            category: category.into(),
            products: into_dtos(rows),
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.products.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Product deleted: {}", id);
        Ok(())
    }
}
