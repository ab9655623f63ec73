//! Checkout through Braintree and order recording.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/products/braintree/token` | No | Client token |
//! | POST | `/api/v1/products/braintree/payment` | Session | Charge the cart and record the order |

pub mod dtos;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use gateway::{BraintreeGateway, PaymentGateway};
pub use repositories::{OrderRepository, PgOrderRepository};
pub use services::PaymentService;
