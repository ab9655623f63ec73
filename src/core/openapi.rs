use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{self, dtos as auth_dtos, models as auth_models};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::payments::{dtos as payments_dtos, handlers as payments_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::forgot_password,
        auth::handlers::update_profile,
        auth::handlers::get_me,
        auth::handlers::admin_probe,
        // Categories
        categories_handlers::create_category,
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::get_products,
        products_handlers::get_product,
        products_handlers::product_photo,
        products_handlers::product_list,
        products_handlers::product_count,
        products_handlers::product_filters,
        products_handlers::search_products,
        products_handlers::product_category,
        products_handlers::delete_product,
        // Payments
        payments_handlers::client_token,
        payments_handlers::checkout,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth_models::UserRole,
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::ForgotPasswordRequestDto,
            auth_dtos::UpdateProfileRequestDto,
            auth_dtos::UserResponseDto,
            auth_dtos::LoginResponseDto,
            ApiResponse<auth_dtos::UserResponseDto>,
            ApiResponse<auth_dtos::LoginResponseDto>,
            // Categories
            categories_dtos::CategoryRequestDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Products
            products_dtos::ProductFormDto,
            products_dtos::ProductCategoryDto,
            products_dtos::ProductResponseDto,
            products_dtos::ProductFilterRequestDto,
            products_dtos::CategoryProductsDto,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::CategoryProductsDto>,
            // Payments
            payments_dtos::ClientTokenDto,
            payments_dtos::PaymentRequestDto,
            payments_dtos::PaymentResultDto,
            ApiResponse<payments_dtos::ClientTokenDto>,
            ApiResponse<payments_dtos::PaymentResultDto>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and profile"),
        (name = "categories", description = "Product categories"),
        (name = "products", description = "Product catalog"),
        (name = "payments", description = "Braintree checkout"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "API documentation for the storefront backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_group_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/auth/login",
            "/api/v1/category/{id}",
            "/api/v1/products/product-filters",
            "/api/v1/products/braintree/payment",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
