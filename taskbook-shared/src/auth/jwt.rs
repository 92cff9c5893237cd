//! JWT token generation and validation
//!
//! Tokens are the only session mechanism: a signed HS256 payload carrying
//! the user's id and email with an expiry. There is no revocation list —
//! expiry is the only invalidation.
//!
//! # Security
//!
//! - **Algorithm**: HS256 (HMAC with SHA-256)
//! - **Expiration**: configurable, default 1 day (set by the API config)
//! - **Validation**: signature and expiration checks
//!
//! # Example
//!
//! ```
//! use taskbook_shared::auth::jwt::{create_token, validate_token, Claims};
//! use chrono::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let claims = Claims::new(42, "user@example.com", Duration::days(1));
//! let token = create_token(&claims, "your-secret-key")?;
//!
//! let validated = validate_token(&token, "your-secret-key")?;
//! assert_eq!(validated.sub, 42);
//! assert_eq!(validated.email, "user@example.com");
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token failed validation (malformed, tampered, or otherwise invalid)
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// JWT claims structure
///
/// The identity assertion issued at login/registration and verified on
/// every protected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: i64,

    /// Email address of the subject
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims expiring `expires_in` from now
    pub fn new(user_id: i64, email: &str, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 with the provided secret.
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies the signature and expiration. Malformed, tampered, and expired
/// tokens all fail; the API maps every failure uniformly to an unauthorized
/// response, the `Expired` variant exists for logging only.
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired tokens and
/// `JwtError::ValidationError` for everything else.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(7, "user@example.com", Duration::days(1));

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "user@example.com");
        assert!(claims.exp > claims.iat);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::new(42, "user@example.com", Duration::hours(1));
        let token = create_token(&claims, SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.sub, 42);
        assert_eq!(validated.email, "user@example.com");
        assert_eq!(validated.exp, claims.exp);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new(1, "a@b.test", Duration::hours(1));
        let token = create_token(&claims, "secret1").expect("Should create token");

        let result = validate_token(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_malformed_token() {
        let result = validate_token("not.a.token", SECRET);
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        // Expired an hour ago, beyond the decoder's clock-skew leeway
        let claims = Claims::new(1, "a@b.test", Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let claims = Claims::new(9, "a@b.test", Duration::hours(1));
        let token = create_token(&claims, SECRET).expect("Should create token");

        // Rewrite the first character of the payload segment; the claims no
        // longer match the signature
        let parts: Vec<&str> = token.split('.').collect();
        let tampered = format!("{}.f{}.{}", parts[0], &parts[1][1..], parts[2]);

        assert!(validate_token(&tampered, SECRET).is_err());
    }
}
