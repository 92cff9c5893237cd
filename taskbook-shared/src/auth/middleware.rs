//! Authentication context and errors for the request pipeline
//!
//! The API's auth layer extracts a bearer token from the `Authorization`
//! header, validates it, and inserts an [`AuthContext`] into the request
//! extensions. Handlers downstream read the caller's identity from there —
//! a typed value, never a mutation of the inbound request.
//!
//! # Example
//!
//! ```
//! use axum::Extension;
//! use taskbook_shared::auth::middleware::AuthContext;
//!
//! async fn handler(Extension(auth): Extension<AuthContext>) -> String {
//!     format!("Hello, user {}!", auth.user_id)
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::jwt::Claims;

/// Authenticated identity attached to request extensions
///
/// Present on a request if and only if the auth layer verified a bearer
/// token for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: i64,

    /// Email carried by the verified token
    pub email: String,
}

impl AuthContext {
    /// Creates auth context from verified token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
        }
    }
}

/// Error type for the authentication layer
///
/// Both variants map to 401: a missing credential and an invalid one are
/// equally unauthorized. The distinction exists for logging.
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header, or no "Bearer " prefix
    MissingCredentials,

    /// Token present but failed verification (malformed, tampered, expired)
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingCredentials => "Missing Authorization header",
            AuthError::InvalidToken(ref reason) => {
                tracing::debug!(%reason, "Rejected bearer token");
                "Invalid or expired token"
            }
        };

        (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_context_from_claims() {
        let claims = Claims::new(17, "user@example.com", Duration::days(1));
        let ctx = AuthContext::from_claims(&claims);

        assert_eq!(ctx.user_id, 17);
        assert_eq!(ctx.email, "user@example.com");
    }
}
