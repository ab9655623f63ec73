/// Number of products returned by the storefront landing list
pub const LATEST_PRODUCTS_LIMIT: i64 = 12;

/// Fixed page size of the paginated product list
pub const PRODUCT_PAGE_SIZE: i64 = 2;

/// Largest accepted price, in cents (fits `NUMERIC(12,2)`)
pub const MAX_PRICE_CENTS: i64 = 999_999_999_999;

/// Maximum accepted product photo size in bytes
pub const MAX_PHOTO_SIZE: usize = 1_000_000;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Ordinary customer account
pub const ROLE_USER: &str = "user";

/// Store administrator - manages categories and products
pub const ROLE_ADMIN: &str = "admin";
