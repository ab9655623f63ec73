//! Flat name + slug categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v1/category/create-category` | Admin | Create a category |
//! | GET | `/api/v1/category` | No | List all categories |
//! | GET | `/api/v1/category/{slug}` | No | Get a category by slug |
//! | PUT | `/api/v1/category/{id}` | Admin | Rename a category |
//! | DELETE | `/api/v1/category/{id}` | Admin | Delete a category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
