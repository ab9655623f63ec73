//! Product catalog with photo blobs, filtering, search and pagination.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v1/products/create-product` | Admin | Create from multipart form |
//! | GET | `/api/v1/products/get-product` | No | 12 newest products |
//! | GET | `/api/v1/products/get-product/{slug}` | No | Product by slug |
//! | GET | `/api/v1/products/product-photo/{pid}` | No | Raw photo bytes |
//! | GET | `/api/v1/products/product-list/{page}` | No | Page of 2, newest first |
//! | GET | `/api/v1/products/product-count` | No | Total products |
//! | POST | `/api/v1/products/product-filters` | No | Filter by categories and price |
//! | GET | `/api/v1/products/search/{keyword}` | No | Text search |
//! | GET | `/api/v1/products/product-category/{slug}` | No | Products of a category |
//! | PUT | `/api/v1/products/{pid}` | Admin | Update (also `/update-product/{pid}`) |
//! | DELETE | `/api/v1/products/{pid}` | Admin | Delete (also `/product/{pid}`) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgProductRepository, ProductRepository};
pub use services::ProductService;
