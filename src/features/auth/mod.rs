//! Accounts and sessions.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v1/auth/register` | No | Create an account |
//! | POST | `/api/v1/auth/login` | No | Issue a session token |
//! | POST | `/api/v1/auth/forgot-password` | No | Reset password with the security answer |
//! | PUT | `/api/v1/auth/profile` | Session | Update name, password, phone, address |
//! | GET | `/api/v1/auth/me` | Session | Current user |
//! | GET | `/api/v1/auth/test` | Admin | Admin probe |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod token;

pub use password::{BcryptHasher, PasswordHasher};
pub use repositories::{PgUserRepository, UserRepository};
pub use services::AuthService;
pub use token::SessionTokenService;
