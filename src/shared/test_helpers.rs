//! In-memory adapters and an HTTP harness for router-level tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::router::{api_router, Services};
use crate::features::auth::models::{NewUser, ProfileChanges, User, UserRole};
use crate::features::auth::repositories::ALREADY_REGISTERED;
use crate::features::auth::{AuthService, BcryptHasher, SessionTokenService, UserRepository};
use crate::features::categories::models::Category;
use crate::features::categories::{CategoryRepository, CategoryService};
use crate::features::payments::gateway::{Charge, GatewayError, PaymentGateway};
use crate::features::payments::models::{NewOrder, Order};
use crate::features::payments::{OrderRepository, PaymentService};
use crate::features::products::models::{
    Product, ProductDraft, ProductFilter, ProductPhoto, ProductWithCategory,
};
use crate::features::products::{ProductRepository, ProductService};
use crate::shared::types::Page;

pub const TEST_PASSWORD: &str = "secret123";
pub const TEST_ANSWER: &str = "blue";
pub const TEST_JWT_SECRET: &str = "test-secret-with-enough-bytes";

/// Nonce the fake gateway declines
pub const DECLINED_NONCE: &str = "fake-processor-declined-visa-nonce";

// =============================================================================
// MEMORY STORE
// =============================================================================

struct StoredProduct {
    product: Product,
    photo: Option<ProductPhoto>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    products: Vec<StoredProduct>,
    orders: Vec<Order>,
    last_tick: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing timestamps so newest-first ordering is deterministic
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_tick {
            Some(last) if now <= last => last + ChronoDuration::microseconds(1),
            _ => now,
        };
        self.last_tick = Some(next);
        next
    }

    fn joined(&self, stored: &StoredProduct) -> ProductWithCategory {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == stored.product.category_id);
        ProductWithCategory {
            product: stored.product.clone(),
            category_name: category.map(|c| c.name.clone()),
            category_slug: category.map(|c| c.slug.clone()),
        }
    }

    /// Products matching `keep`, newest first
    fn products_where(&self, keep: impl Fn(&Product) -> bool) -> Vec<ProductWithCategory> {
        let mut rows: Vec<ProductWithCategory> = self
            .products
            .iter()
            .filter(|p| keep(&p.product))
            .map(|p| self.joined(p))
            .collect();
        rows.sort_by(|a, b| {
            (b.product.created_at, b.product.id).cmp(&(a.product.created_at, a.product.id))
        });
        rows
    }
}

/// Single in-memory store backing every repository port
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn set_role(&self, email: &str, role: UserRole) {
        let mut tables = self.lock();
        if let Some(user) = tables.users.iter_mut().find(|u| u.email == email) {
            user.role = role;
        }
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.lock().users.iter().find(|u| u.email == email).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn product_count(&self) -> usize {
        self.lock().products.len()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.user_by_email(email))
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(ALREADY_REGISTERED.to_string()));
        }

        let now = tables.tick();
        let user = User {
            id: Uuid::now_v7(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            address: user.address,
            answer_hash: user.answer_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool> {
        let mut tables = self.lock();
        let now = tables.tick();
        Ok(match tables.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = now;
                true
            }
            None => false,
        })
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> Result<Option<User>> {
        let mut tables = self.lock();
        let now = tables.tick();
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.name = changes.name;
            user.password_hash = changes.password_hash;
            user.phone = changes.phone;
            user.address = changes.address;
            user.updated_at = now;
            user.clone()
        }))
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Category>> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.name == name).cloned())
    }

    async fn insert(&self, name: &str, slug: &str) -> Result<Category> {
        let mut tables = self.lock();
        let now = tables.tick();
        let category = Category {
            id: Uuid::now_v7(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: Uuid, name: &str, slug: &str) -> Result<Option<Category>> {
        let mut tables = self.lock();
        let now = tables.tick();
        Ok(tables.categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.name = name.to_string();
            c.slug = slug.to_string();
            c.updated_at = now;
            c.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.lock();
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        Ok(tables.categories.len() < before)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn insert(&self, draft: ProductDraft) -> Result<ProductWithCategory> {
        let mut tables = self.lock();
        let now = tables.tick();
        let stored = StoredProduct {
            product: Product {
                id: Uuid::now_v7(),
                name: draft.name,
                slug: draft.slug,
                description: draft.description,
                price: draft.price,
                quantity: draft.quantity,
                category_id: draft.category_id,
                has_photo: draft.photo.is_some(),
                created_at: now,
                updated_at: now,
            },
            photo: draft.photo,
        };
        let row = tables.joined(&stored);
        tables.products.push(stored);
        Ok(row)
    }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Option<ProductWithCategory>> {
        let mut tables = self.lock();
        let now = tables.tick();
        let Some(index) = tables.products.iter().position(|p| p.product.id == id) else {
            return Ok(None);
        };

        let stored = &mut tables.products[index];
        let p = &mut stored.product;
        p.name = draft.name;
        p.slug = draft.slug;
        p.description = draft.description;
        p.price = draft.price;
        p.quantity = draft.quantity;
        p.category_id = draft.category_id;
        p.updated_at = now;
        if let Some(photo) = draft.photo {
            stored.photo = Some(photo);
        }
        stored.product.has_photo = stored.photo.is_some();

        Ok(Some(tables.joined(&tables.products[index])))
    }

    async fn latest(&self, limit: i64) -> Result<Vec<ProductWithCategory>> {
        let mut rows = self.lock().products_where(|_| true);
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductWithCategory>> {
        Ok(self.lock().products_where(|p| p.slug == slug).pop())
    }

    async fn photo(&self, id: Uuid) -> Result<Option<ProductPhoto>> {
        Ok(self
            .lock()
            .products
            .iter()
            .find(|p| p.product.id == id)
            .and_then(|p| p.photo.clone()))
    }

    async fn page(&self, page: Page) -> Result<Vec<ProductWithCategory>> {
        Ok(self
            .lock()
            .products_where(|_| true)
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.lock().products.len() as i64)
    }

    async fn filter(&self, filter: &ProductFilter) -> Result<Vec<ProductWithCategory>> {
        Ok(self.lock().products_where(|p| filter.matches(p)))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<ProductWithCategory>> {
        let needle = keyword.to_lowercase();
        Ok(self.lock().products_where(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        }))
    }

    async fn by_category(&self, category_id: Uuid) -> Result<Vec<ProductWithCategory>> {
        Ok(self.lock().products_where(|p| p.category_id == category_id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.lock();
        let before = tables.products.len();
        tables.products.retain(|p| p.product.id != id);
        Ok(tables.products.len() < before)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert(&self, order: NewOrder) -> Result<Order> {
        let mut tables = self.lock();
        let now = tables.tick();
        let order = Order {
            id: Uuid::now_v7(),
            products: sqlx::types::Json(order.products),
            payment: sqlx::types::Json(order.payment),
            buyer_id: order.buyer_id,
            created_at: now,
        };
        tables.orders.push(order.clone());
        Ok(order)
    }
}

// =============================================================================
// FAKE GATEWAY
// =============================================================================

/// Settles every nonce except [`DECLINED_NONCE`]
#[derive(Default)]
pub struct FakeGateway {
    charges: Mutex<Vec<Decimal>>,
}

impl FakeGateway {
    /// Amounts of the sales that went through
    pub fn charged(&self) -> Vec<Decimal> {
        self.charges.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn client_token(&self) -> std::result::Result<String, GatewayError> {
        Ok("fake-client-token".to_string())
    }

    async fn charge(
        &self,
        nonce: &str,
        amount: Decimal,
    ) -> std::result::Result<Charge, GatewayError> {
        if nonce == DECLINED_NONCE {
            return Err(GatewayError::Declined("Do Not Honor".to_string()));
        }

        let mut charges = self.charges.lock().unwrap();
        charges.push(amount);
        let transaction_id = format!("tx-{}", charges.len());
        Ok(Charge {
            raw: json!({
                "id": transaction_id,
                "status": "SUBMITTED_FOR_SETTLEMENT",
                "amount": { "value": format!("{:.2}", amount), "currencyCode": "USD" }
            }),
            transaction_id,
            status: "SUBMITTED_FOR_SETTLEMENT".to_string(),
        })
    }
}

// =============================================================================
// HTTP HARNESS
// =============================================================================

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<FakeGateway>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_password_reset(true)
    }

    pub fn with_password_reset(enabled: bool) -> Self {
        let store = Arc::new(MemoryStore::default());
        let gateway = Arc::new(FakeGateway::default());

        let auth = Arc::new(AuthService::new(
            store.clone(),
            Arc::new(BcryptHasher::new(crate::core::config::BCRYPT_MIN_COST)),
            Arc::new(SessionTokenService::new(
                TEST_JWT_SECRET,
                std::time::Duration::from_secs(7 * 24 * 3600),
            )),
            enabled,
        ));
        let services = Services {
            auth,
            categories: Arc::new(CategoryService::new(store.clone())),
            products: Arc::new(ProductService::new(store.clone(), store.clone())),
            payments: Arc::new(PaymentService::new(gateway.clone(), store.clone())),
        };

        let server = TestServer::new(api_router(&services, 2 * 1024 * 1024))
            .expect("failed to start test server");

        Self {
            server,
            store,
            gateway,
        }
    }

    pub fn registration(email: &str) -> Value {
        let name: String = Name().fake();
        json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "phone": "555-0100",
            "address": "1 Main St",
            "question": TEST_ANSWER
        })
    }

    /// Register a fresh user and return its email
    pub async fn register_user(&self) -> String {
        let email: String = SafeEmail().fake();
        let email = email.to_lowercase();
        self.server
            .post("/api/v1/auth/register")
            .json(&Self::registration(&email))
            .await
            .assert_status(StatusCode::CREATED);
        email
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["data"]["token"]
            .as_str()
            .expect("login response carries a token")
            .to_string()
    }

    /// Session token for a new ordinary user
    pub async fn user_token(&self) -> String {
        let email = self.register_user().await;
        self.login(&email, TEST_PASSWORD).await
    }

    /// Session token for a new admin
    pub async fn admin_token(&self) -> String {
        let email = self.register_user().await;
        self.store.set_role(&email, UserRole::Admin);
        self.login(&email, TEST_PASSWORD).await
    }

    /// Create a category through the API and return its id
    pub async fn create_category(&self, token: &str, name: &str) -> Uuid {
        let response = self
            .server
            .post("/api/v1/category/create-category")
            .authorization_bearer(token)
            .json(&json!({ "name": name }))
            .await;
        response.assert_status(StatusCode::CREATED);
        serde_json::from_value(response.json::<Value>()["data"]["id"].clone())
            .expect("category id")
    }
}
