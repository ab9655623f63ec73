use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Recorded sale: cart snapshot plus the gateway result
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub products: Json<Value>,
    pub payment: Json<Value>,
    pub buyer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub products: Value,
    pub payment: Value,
    pub buyer_id: Uuid,
}
