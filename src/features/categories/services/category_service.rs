use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::repositories::CategoryRepository;
use crate::shared::slug::slugify;

/// Result of a create request; an existing name is not an error
#[derive(Debug)]
pub enum CreateOutcome {
    Created(CategoryResponseDto),
    Existing(CategoryResponseDto),
}

/// Service for category operations
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn create(&self, name: &str) -> Result<CreateOutcome> {
        if let Some(existing) = self.categories.find_by_name(name).await? {
            return Ok(CreateOutcome::Existing(existing.into()));
        }

        let category = self.categories.insert(name, &slugify(name)).await?;
        tracing::info!("Category created: {} ({})", category.name, category.id);
        Ok(CreateOutcome::Created(category.into()))
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.categories.list().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        self.categories
            .find_by_slug(slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Rename a category; the slug follows the new name
    pub async fn update(&self, id: Uuid, name: &str) -> Result<CategoryResponseDto> {
        let category = self
            .categories
            .update(id, name, &slugify(name))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!("Category updated: {}", id);
        Ok(category.into())
    }

    /// Delete a category. Products keep their dangling reference.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.categories.delete(id).await? {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        tracing::info!("Category deleted: {}", id);
        Ok(())
    }
}
