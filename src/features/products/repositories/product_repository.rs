use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::models::{
    ProductDraft, ProductFilter, ProductPhoto, ProductWithCategory,
};
use crate::shared::types::Page;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, draft: ProductDraft) -> Result<ProductWithCategory>;

    /// Overwrites every field; the photo only when the draft carries one
    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<ProductWithCategory>>;

    /// Newest first, at most `limit`
    async fn latest(&self, limit: i64) -> Result<Vec<ProductWithCategory>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductWithCategory>>;

    async fn photo(&self, id: Uuid) -> Result<Option<ProductPhoto>>;

    async fn page(&self, page: Page) -> Result<Vec<ProductWithCategory>>;

    async fn count(&self) -> Result<i64>;

    async fn filter(&self, filter: &ProductFilter) -> Result<Vec<ProductWithCategory>>;

    /// Case-insensitive literal substring match over name or description
    async fn search(&self, keyword: &str) -> Result<Vec<ProductWithCategory>>;

    async fn by_category(&self, category_id: Uuid) -> Result<Vec<ProductWithCategory>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

const SELECT_PRODUCTS: &str = r#"
    SELECT p.id, p.name, p.slug, p.description, p.price, p.quantity, p.category_id,
           p.photo IS NOT NULL AS has_photo, p.created_at, p.updated_at,
           c.name AS category_name, c.slug AS category_slug
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

const NEWEST_FIRST: &str = " ORDER BY p.created_at DESC, p.id DESC";

/// Escape LIKE wildcards so the keyword matches literally
pub fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductWithCategory>> {
        sqlx::query_as::<_, ProductWithCategory>(&format!("{SELECT_PRODUCTS} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get product by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn fetch_list(
        &self,
        mut query: QueryBuilder<'_, Postgres>,
        context: &str,
    ) -> Result<Vec<ProductWithCategory>> {
        query
            .build_query_as::<ProductWithCategory>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to {}: {:?}", context, e);
                AppError::Database(e)
            })
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, draft: ProductDraft) -> Result<ProductWithCategory> {
        let (photo, content_type) = match draft.photo {
            Some(photo) => (Some(photo.data), Some(photo.content_type)),
            None => (None, None),
        };

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO products
                (id, name, slug, description, price, quantity, category_id, photo, photo_content_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&draft.name)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.category_id)
        .bind(photo)
        .bind(content_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert product: {:?}", e);
            AppError::Database(e)
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Product {} vanished after insert", id)))
    }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<ProductWithCategory>> {
        let (photo, content_type) = match draft.photo {
            Some(photo) => (Some(photo.data), Some(photo.content_type)),
            None => (None, None),
        };

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE products
            SET name = $1, slug = $2, description = $3, price = $4, quantity = $5,
                category_id = $6,
                photo = COALESCE($7, photo),
                photo_content_type = COALESCE($8, photo_content_type),
                updated_at = NOW()
            WHERE id = $9
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.category_id)
        .bind(photo)
        .bind(content_type)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product: {:?}", e);
            AppError::Database(e)
        })?;

        match updated {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn latest(&self, limit: i64) -> Result<Vec<ProductWithCategory>> {
        let mut query = QueryBuilder::new(SELECT_PRODUCTS);
        query.push(NEWEST_FIRST).push(" LIMIT ").push_bind(limit);
        self.fetch_list(query, "list latest products").await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductWithCategory>> {
        sqlx::query_as::<_, ProductWithCategory>(&format!(
            "{SELECT_PRODUCTS} WHERE p.slug = $1 ORDER BY p.created_at, p.id LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product by slug: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn photo(&self, id: Uuid) -> Result<Option<ProductPhoto>> {
        sqlx::query_as::<_, ProductPhoto>(
            r#"
            SELECT photo AS data,
                   COALESCE(photo_content_type, 'application/octet-stream') AS content_type
            FROM products
            WHERE id = $1 AND photo IS NOT NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product photo: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn page(&self, page: Page) -> Result<Vec<ProductWithCategory>> {
        let mut query = QueryBuilder::new(SELECT_PRODUCTS);
        query
            .push(NEWEST_FIRST)
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        self.fetch_list(query, "list product page").await
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count products: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn filter(&self, filter: &ProductFilter) -> Result<Vec<ProductWithCategory>> {
        let mut query = QueryBuilder::new(SELECT_PRODUCTS);
        query.push(" WHERE TRUE");

        if !filter.categories.is_empty() {
            query
                .push(" AND p.category_id = ANY(")
                .push_bind(filter.categories.clone())
                .push(")");
        }
        if let Some((min, max)) = filter.price_range {
            query
                .push(" AND p.price BETWEEN ")
                .push_bind(min)
                .push(" AND ")
                .push_bind(max);
        }

        query.push(NEWEST_FIRST);
        self.fetch_list(query, "filter products").await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<ProductWithCategory>> {
        let pattern = format!("%{}%", escape_like(keyword));

        let mut query = QueryBuilder::new(SELECT_PRODUCTS);
        query
            .push(" WHERE p.name ILIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR p.description ILIKE ")
            .push_bind(pattern)
            .push(r" ESCAPE '\'")
            .push(NEWEST_FIRST);
        self.fetch_list(query, "search products").await
    }

    async fn by_category(&self, category_id: Uuid) -> Result<Vec<ProductWithCategory>> {
        let mut query = QueryBuilder::new(SELECT_PRODUCTS);
        query
            .push(" WHERE p.category_id = ")
            .push_bind(category_id)
            .push(NEWEST_FIRST);
        self.fetch_list(query, "list products by category").await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50% off"), r"50\% off");
        assert_eq!(escape_like("a_b"), r"a\_b");
        assert_eq!(escape_like(r"c:\dir"), r"c:\\dir");
        assert_eq!(escape_like("plain"), "plain");
    }

    /// Runs the real SQL; needs `DATABASE_URL` pointing at a disposable Postgres server
    mod postgres {
        use rust_decimal::Decimal;
        use sqlx::PgPool;
        use uuid::Uuid;

        use crate::features::categories::{CategoryRepository, PgCategoryRepository};
        use crate::features::products::models::{
            ProductDraft, ProductFilter, ProductPhoto, ProductWithCategory,
        };
        use crate::features::products::{PgProductRepository, ProductRepository};
        use crate::shared::slug::slugify;

        fn draft(name: &str, description: &str, price: i64, category_id: Uuid) -> ProductDraft {
            ProductDraft {
                name: name.to_string(),
                slug: slugify(name),
                description: description.to_string(),
                price: Decimal::from(price),
                quantity: 1,
                category_id,
                photo: None,
            }
        }

        fn names(rows: &[ProductWithCategory]) -> Vec<&str> {
            rows.iter().map(|r| r.product.name.as_str()).collect()
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "needs a Postgres DATABASE_URL"]
        async fn test_search_is_literal_and_case_insensitive(pool: PgPool) {
            let repo = PgProductRepository::new(pool);
            let category = Uuid::new_v4();
            repo.insert(draft("100% Cotton Shirt", "soft", 10, category))
                .await
                .unwrap();
            repo.insert(draft("1000 Thread Sheets", "COTTON blend", 20, category))
                .await
                .unwrap();

            assert_eq!(
                names(&repo.search("100%").await.unwrap()),
                vec!["100% Cotton Shirt"]
            );
            assert_eq!(
                names(&repo.search("cotton").await.unwrap()),
                vec!["1000 Thread Sheets", "100% Cotton Shirt"]
            );
            assert!(repo.search("_").await.unwrap().is_empty());
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "needs a Postgres DATABASE_URL"]
        async fn test_filter_binds_categories_and_inclusive_range(pool: PgPool) {
            let repo = PgProductRepository::new(pool);
            let (cat_a, cat_b) = (Uuid::new_v4(), Uuid::new_v4());
            for (name, price, category) in [
                ("Cheap A", 5, cat_a),
                ("Mid A", 30, cat_a),
                ("Edge A", 50, cat_a),
                ("Mid B", 30, cat_b),
            ] {
                repo.insert(draft(name, "", price, category)).await.unwrap();
            }

            let filter = ProductFilter {
                categories: vec![cat_a],
                price_range: Some((Decimal::from(10), Decimal::from(50))),
            };
            assert_eq!(
                names(&repo.filter(&filter).await.unwrap()),
                vec!["Edge A", "Mid A"]
            );
            assert_eq!(repo.filter(&ProductFilter::default()).await.unwrap().len(), 4);
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "needs a Postgres DATABASE_URL"]
        async fn test_update_without_photo_keeps_stored_photo(pool: PgPool) {
            let repo = PgProductRepository::new(pool);
            let photo = ProductPhoto {
                data: vec![1, 2, 3],
                content_type: "image/png".to_string(),
            };
            let mut first = draft("Lamp", "", 10, Uuid::new_v4());
            first.photo = Some(photo.clone());
            let id = repo.insert(first).await.unwrap().product.id;

            let updated = repo
                .update(id, draft("Floor Lamp", "", 12, Uuid::new_v4()))
                .await
                .unwrap()
                .unwrap();

            assert_eq!(updated.product.slug, "floor-lamp");
            assert!(updated.product.has_photo);
            assert_eq!(repo.photo(id).await.unwrap(), Some(photo));
        }

        #[sqlx::test(migrations = "./migrations")]
        #[ignore = "needs a Postgres DATABASE_URL"]
        async fn test_deleted_category_leaves_join_empty(pool: PgPool) {
            let categories = PgCategoryRepository::new(pool.clone());
            let repo = PgProductRepository::new(pool);
            let category = categories.insert("Lights", "lights").await.unwrap();
            repo.insert(draft("Bulb", "", 2, category.id)).await.unwrap();

            let joined = repo.find_by_slug("bulb").await.unwrap().unwrap();
            assert_eq!(joined.category_slug.as_deref(), Some("lights"));

            assert!(categories.delete(category.id).await.unwrap());
            let orphan = repo.find_by_slug("bulb").await.unwrap().unwrap();
            assert_eq!(orphan.product.category_id, category.id);
            assert!(orphan.category_name.is_none());
        }
    }
}
