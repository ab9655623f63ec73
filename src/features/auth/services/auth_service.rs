use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    LoginResponseDto, PasswordReset, ProfileUpdate, Registration, UserResponseDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::models::{NewUser, ProfileChanges, UserRole};
use crate::features::auth::password::PasswordHasher;
use crate::features::auth::repositories::{UserRepository, ALREADY_REGISTERED};
use crate::features::auth::token::SessionTokenService;

/// Service for account operations and session authentication
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<SessionTokenService>,
    password_reset_enabled: bool,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<SessionTokenService>,
        password_reset_enabled: bool,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            password_reset_enabled,
        }
    }

    /// Register a new account with the `user` role
    pub async fn register(&self, input: Registration) -> Result<UserResponseDto> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(ALREADY_REGISTERED.to_string()));
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let answer_hash = self.hasher.hash(&input.answer).await?;

        let user = self
            .users
            .insert(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                phone: input.phone,
                address: input.address,
                answer_hash,
                role: UserRole::User,
            })
            .await?;

        tracing::info!("User registered: {}", user.id);
        Ok(user.into())
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponseDto> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("Email is not registered".to_string()))?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            return Err(AppError::Unauthorized("Invalid Password".to_string()));
        }

        let issued = self.tokens.issue(user.id)?;
        tracing::info!("User logged in: {}", user.id);

        Ok(LoginResponseDto {
            user: user.into(),
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
        })
    }

    /// Replace the password when the security answer matches
    pub async fn forgot_password(&self, reset: PasswordReset) -> Result<()> {
        if !self.password_reset_enabled {
            return Err(AppError::Forbidden(
                "Password reset is disabled".to_string(),
            ));
        }

        let wrong = || AppError::NotFound("Wrong email or answer".to_string());

        let user = self
            .users
            .find_by_email(&reset.email)
            .await?
            .ok_or_else(wrong)?;

        if !self.hasher.verify(&reset.answer, &user.answer_hash).await? {
            return Err(wrong());
        }

        let password_hash = self.hasher.hash(&reset.new_password).await?;
        if !self.users.update_password(user.id, &password_hash).await? {
            return Err(wrong());
        }

        tracing::info!("Password reset for user: {}", user.id);
        Ok(())
    }

    /// Apply a profile update; absent fields keep their stored value
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<UserResponseDto> {
        let current = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let password_hash = match update.password {
            Some(ref password) => self.hasher.hash(password).await?,
            None => current.password_hash,
        };

        let changes = ProfileChanges {
            name: update.name.unwrap_or(current.name),
            password_hash,
            phone: update.phone.unwrap_or(current.phone),
            address: update.address.unwrap_or(current.address),
        };

        let user = self
            .users
            .update_profile(user_id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("Profile updated for user: {}", user.id);
        Ok(user.into())
    }

    /// Sanitized record for the authenticated user (for /me endpoint)
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserResponseDto> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Resolve a session token to the user it was issued for
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = self.tokens.verify(token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

        Ok(AuthenticatedUser::from(&user))
    }
}
