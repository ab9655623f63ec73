mod category_service;

pub use category_service::{CategoryService, CreateOutcome};
