//! Authentication endpoints
//!
//! - `POST /api/auth/register` - Create a new account
//! - `POST /api/auth/login` - Exchange credentials for a token
//! - `POST /api/auth/refresh` - Re-issue a token for the current bearer
//!
//! Login failure is deliberately constant-shaped: an unknown email and a
//! wrong password produce byte-identical 401 responses, so the endpoint
//! leaks nothing about which half of the credential was wrong.

use crate::{
    app::AppState,
    error::{validation_failed, ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskbook_shared::{
    auth::{
        jwt::{create_token, Claims},
        middleware::AuthContext,
        password::{hash_password, validate_password_strength, verify_password},
    },
    models::user::{CreateUser, SafeUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// First name
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,

    /// Last name
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,

    /// Email address
    #[validate(email(message = "Valid email required"))]
    pub email: String,

    /// Password (also checked for strength)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Valid email required"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response for register and login: the safe user plus a bearer token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Safe user fields (no digest)
    pub user: SafeUser,

    /// Signed bearer token
    pub token: String,
}

/// Refresh response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Fresh bearer token with the same claims
    pub token: String,
}

/// Lowercases and trims an email for storage and lookup
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Register a new user
///
/// # Errors
///
/// - `400 Bad Request`: validation failed (field-error list)
/// - `409 Conflict`: email already in use
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate().map_err(validation_failed)?;

    // Strength rules beyond minimum length
    validate_password_strength(&req.password).map_err(|message| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message,
        }])
    })?;

    let email = normalize_email(&req.email);

    if User::find_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::Conflict("Email already in use".to_string()));
    }

    let password_hash = hash_password(&req.password, state.config.bcrypt_cost)?;

    let user = User::create(
        &state.db,
        CreateUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email,
            password_hash,
        },
    )
    .await?;

    let claims = Claims::new(user.user_id, &user.email, state.config.token_ttl());
    let token = create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = user.user_id, "Registered new user");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

/// Login with email and password
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: invalid credentials (unknown email and wrong
///   password are indistinguishable)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(validation_failed)?;

    let email = normalize_email(&req.email);

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let claims = Claims::new(user.user_id, &user.email, state.config.token_ttl());
    let token = create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// Re-issue a token for the authenticated caller
///
/// The user is re-resolved by id so a token belonging to a since-deleted
/// account cannot be refreshed.
///
/// # Errors
///
/// - `401 Unauthorized`: the authenticated id no longer resolves to a user
pub async fn refresh(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<RefreshResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    let claims = Claims::new(user.user_id, &user.email, state.config.token_ttl());
    let token = create_token(&claims, state.jwt_secret())?;

    Ok(Json(RefreshResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
        assert_eq!(normalize_email("plain@host.test"), "plain@host.test");
    }

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            first_name: "".to_string(),
            last_name: "Lovelace".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn test_login_request_requires_password() {
        let req = LoginRequest {
            email: "ada@example.com".to_string(),
            password: "".to_string(),
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
