use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::payments::models::{NewOrder, Order};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: NewOrder) -> Result<Order>;
}

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert(&self, order: NewOrder) -> Result<Order> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, products, payment, buyer_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, products, payment, buyer_id, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(Json(order.products))
        .bind(Json(order.payment))
        .bind(order.buyer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert order: {:?}", e);
            AppError::Database(e)
        })
    }
}
