use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    ForgotPasswordRequestDto, LoginRequestDto, LoginResponseDto, RegisterRequestDto,
    UpdateProfileRequestDto, UserResponseDto,
};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Missing or invalid field"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    let input = dto.validated()?;
    let user = service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(user, "User Registered Successfully")),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "Email is not registered")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    let (email, password) = dto.validated()?;
    let response = service.login(&email, &password).await?;
    Ok(Json(ApiResponse::ok(response, "Logged in successfully")))
}

/// Reset a password using the security answer
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = ForgotPasswordRequestDto,
    responses(
        (status = 200, description = "Password reset"),
        (status = 400, description = "Missing or invalid field"),
        (status = 403, description = "Password reset disabled"),
        (status = 404, description = "Wrong email or answer")
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ForgotPasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    let reset = dto.validated()?;
    service.forgot_password(reset).await?;
    Ok(Json(ApiResponse::message("Password reset successful")))
}

/// Update the current user's profile
#[utoipa::path(
    put,
    path = "/api/v1/auth/profile",
    request_body = UpdateProfileRequestDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Password too short"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<UpdateProfileRequestDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let update = dto.validated()?;
    let updated = service.update_profile(user.id, update).await?;
    Ok(Json(ApiResponse::ok(updated, "Profile updated successfully")))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user_data = service.current_user(user.id).await?;
    Ok(Json(ApiResponse::ok(user_data, "Current user")))
}

/// Admin-only probe
#[utoipa::path(
    get,
    path = "/api/v1/auth/test",
    responses(
        (status = 200, description = "Caller is an admin"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_probe(RequireAdmin(_admin): RequireAdmin) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Protected Route"))
}
