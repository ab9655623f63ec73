use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Product row without the photo blob
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    /// Not constrained; may point at a deleted category
    pub category_id: Uuid,
    pub has_photo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product joined with its category, when the category still exists
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
}

/// Stored photo blob
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct ProductPhoto {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Validated values for a product insert or update
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: Uuid,
    /// `None` on update keeps the stored photo
    pub photo: Option<ProductPhoto>,
}

/// Restrictions for the filter listing; empty means unrestricted
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub categories: Vec<Uuid>,
    pub price_range: Option<(Decimal, Decimal)>,
}

impl ProductFilter {
    /// In-process equivalent of the SQL filter, for the in-memory store
    #[cfg(test)]
    pub fn matches(&self, product: &Product) -> bool {
        let in_category =
            self.categories.is_empty() || self.categories.contains(&product.category_id);
        let in_range = self
            .price_range
            .is_none_or(|(min, max)| min <= product.price && product.price <= max);
        in_category && in_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(category_id: Uuid, price: i64) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Lamp".into(),
            slug: "lamp".into(),
            description: "Desk lamp".into(),
            price: Decimal::from(price),
            quantity: 1,
            category_id,
            has_photo: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(ProductFilter::default().matches(&product(Uuid::new_v4(), 5)));
    }

    #[test]
    fn test_filter_combines_category_and_inclusive_range() {
        let cat_a = Uuid::new_v4();
        let filter = ProductFilter {
            categories: vec![cat_a],
            price_range: Some((Decimal::from(10), Decimal::from(50))),
        };

        assert!(filter.matches(&product(cat_a, 10)));
        assert!(filter.matches(&product(cat_a, 50)));
        assert!(!filter.matches(&product(cat_a, 51)));
        assert!(!filter.matches(&product(Uuid::new_v4(), 20)));
    }
}
