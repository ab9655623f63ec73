use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::shared::validation::Rules;

/// Request DTO for creating or renaming a category
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CategoryRequestDto {
    pub name: Option<String>,
}

impl CategoryRequestDto {
    /// Trimmed, non-blank name
    pub fn validated(self) -> Result<String> {
        Rules::new()
            .required("name", "Name", self.name.as_deref())
            .check()?;
        Ok(self.name.unwrap_or_default().trim().to_string())
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
