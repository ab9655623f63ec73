mod user_repository;

pub use user_repository::{PgUserRepository, UserRepository, ALREADY_REGISTERED};
