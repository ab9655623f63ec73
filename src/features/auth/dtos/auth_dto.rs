use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::{User, UserRole};
use crate::shared::validation::{is_blank, non_blank, FieldError, Rules, MIN_PASSWORD_LENGTH};

const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
const INVALID_CREDENTIALS: &str = "Invalid Email or Password";

fn normalize_email(email: Option<String>) -> Option<String> {
    email.map(|e| e.trim().to_lowercase())
}

fn validation_error(err: validator::ValidationErrors) -> AppError {
    AppError::Validation(err.to_string())
}

/// Request DTO for user registration
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub password: Option<String>,

    pub phone: Option<String>,

    pub address: Option<String>,

    /// Answer to the security question, used by forgot-password
    #[serde(alias = "answer")]
    pub question: Option<String>,
}

/// Registration input after validation
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub answer: String,
}

impl RegisterRequestDto {
    /// Check the required fields in order, then formats
    pub fn validated(mut self) -> Result<Registration> {
        Rules::new()
            .required("name", "Name", self.name.as_deref())
            .required("email", "Email", self.email.as_deref())
            .required("password", "Password", self.password.as_deref())
            .required("phone", "Phone", self.phone.as_deref())
            .required("address", "Address", self.address.as_deref())
            .required("question", "Question", self.question.as_deref())
            .min_chars(
                "password",
                MIN_PASSWORD_LENGTH,
                self.password.as_deref(),
                PASSWORD_TOO_SHORT,
            )
            .check()?;

        self.email = normalize_email(self.email.take());
        self.validate().map_err(validation_error)?;

        let trimmed = |v: Option<String>| v.unwrap_or_default().trim().to_string();
        Ok(Registration {
            name: trimmed(self.name),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            phone: trimmed(self.phone),
            address: trimmed(self.address),
            answer: trimmed(self.question),
        })
    }
}

/// Request DTO for user login
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequestDto {
    /// Returns `(email, password)`
    pub fn validated(self) -> Result<(String, String)> {
        if is_blank(self.email.as_deref()) {
            return Err(FieldError::invalid("email", INVALID_CREDENTIALS).into());
        }
        if is_blank(self.password.as_deref()) {
            return Err(FieldError::invalid("password", INVALID_CREDENTIALS).into());
        }

        Ok((
            normalize_email(self.email).unwrap_or_default(),
            self.password.unwrap_or_default(),
        ))
    }
}

/// Request DTO for resetting a password with the security answer
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequestDto {
    pub email: Option<String>,

    #[serde(alias = "answer")]
    pub question: Option<String>,

    #[serde(alias = "new_password")]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: String,
    pub answer: String,
    pub new_password: String,
}

impl ForgotPasswordRequestDto {
    pub fn validated(self) -> Result<PasswordReset> {
        Rules::new()
            .required("email", "Email", self.email.as_deref())
            .required("question", "Question", self.question.as_deref())
            .required("newPassword", "New password", self.new_password.as_deref())
            .min_chars(
                "newPassword",
                MIN_PASSWORD_LENGTH,
                self.new_password.as_deref(),
                PASSWORD_TOO_SHORT,
            )
            .check()?;

        Ok(PasswordReset {
            email: normalize_email(self.email).unwrap_or_default(),
            answer: self.question.unwrap_or_default().trim().to_string(),
            new_password: self.new_password.unwrap_or_default(),
        })
    }
}

/// Request DTO for profile updates. Blank fields keep their stored value and
/// `email` is accepted but never changed.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequestDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Only the fields that carry content
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateProfileRequestDto {
    pub fn validated(self) -> Result<ProfileUpdate> {
        Rules::new()
            .min_chars(
                "password",
                MIN_PASSWORD_LENGTH,
                self.password.as_deref(),
                "Password is required and 6 characters long",
            )
            .check()?;

        let present = |v: Option<String>| non_blank(v.as_deref()).map(str::to_string);
        Ok(ProfileUpdate {
            name: present(self.name),
            password: self.password.filter(|p| !p.is_empty()),
            phone: present(self.phone),
            address: present(self.address),
        })
    }
}

/// Sanitized user projection, never carries hashes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            address: u.address,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    pub user: UserResponseDto,
    /// HS256 session token
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}
