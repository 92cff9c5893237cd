//! Password hashing using bcrypt
//!
//! Credentials are stored as salted bcrypt digests. The work factor (cost)
//! is configurable so deployments can raise it as hardware improves; the
//! default lives in the API configuration, not here.
//!
//! Verification delegates to bcrypt's constant-time comparison. Plaintext
//! passwords are never logged, stored, or returned.
//!
//! # Example
//!
//! ```
//! use taskbook_shared::auth::password::{hash_password, verify_password};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("super_secret_password_123", 4)?;
//! assert!(verify_password("super_secret_password_123", &hash)?);
//! assert!(!verify_password("wrong_password", &hash)?);
//! # Ok(())
//! # }
//! ```

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password against a stored digest
    #[error("Failed to verify password: {0}")]
    VerifyError(String),
}

/// Hashes a password with bcrypt at the given cost factor
///
/// The cost is the log2 number of key-expansion rounds; each increment
/// doubles the work. The salt is generated per call, so hashing the same
/// password twice yields different digests.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if the cost is out of bcrypt's
/// accepted range or hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(password, cost).map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored bcrypt digest
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch. The comparison
/// itself is constant-time inside bcrypt.
///
/// # Errors
///
/// Returns `PasswordError::VerifyError` if the stored digest is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| PasswordError::VerifyError(e.to_string()))
}

/// Validates password strength
///
/// Registration requires passwords to be at least 8 characters and contain
/// at least one lowercase letter, one uppercase letter, one digit, and one
/// symbol.
///
/// # Example
///
/// ```
/// use taskbook_shared::auth::password::validate_password_strength;
///
/// assert!(validate_password_strength("MyP@ssw0rd!").is_ok());
/// assert!(validate_password_strength("Sh0rt!").is_err());
/// assert!(validate_password_strength("Password123").is_err());
/// ```
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one digit".to_string());
    }

    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err("Password must contain at least one symbol".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the test suite fast; production cost comes
    // from configuration.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123", TEST_COST).expect("Hash should succeed");

        // bcrypt digests carry algorithm version and cost
        assert!(hash.starts_with("$2"));
        assert!(hash.contains("$04$"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let password = "same_password";

        let hash1 = hash_password(password, TEST_COST).expect("Hash 1 should succeed");
        let hash2 = hash_password(password, TEST_COST).expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correct_password";
        let hash = hash_password(password, TEST_COST).expect("Hash should succeed");

        let result = verify_password(password, &hash).expect("Verify should succeed");
        assert!(result, "Correct password should verify");
    }

    #[test]
    fn test_verify_password_incorrect() {
        let password = "correct_password";
        let hash = hash_password(password, TEST_COST).expect("Hash should succeed");

        let result = verify_password("wrong_password", &hash).expect("Verify should succeed");
        assert!(!result, "Wrong password should not verify");
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("password", "not_a_bcrypt_digest");
        assert!(result.is_err(), "Malformed digest should return error");
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
        ];

        for password in passwords {
            let hash = hash_password(password, TEST_COST).expect("Hash should succeed");
            let verified = verify_password(password, &hash).expect("Verify should succeed");
            assert!(verified, "Password '{}' should verify", password);
        }
    }

    #[test]
    fn test_validate_password_strength_valid() {
        for password in ["MyP@ssw0rd!", "Str0ng!Pass", "C0mpl3x#Pwd"] {
            assert!(
                validate_password_strength(password).is_ok(),
                "Password '{}' should be valid",
                password
            );
        }
    }

    #[test]
    fn test_validate_password_strength_too_short() {
        let result = validate_password_strength("Sh0rt!");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("at least 8 characters"));
    }

    #[test]
    fn test_validate_password_strength_no_uppercase() {
        let result = validate_password_strength("lowercase1!");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("uppercase letter"));
    }

    #[test]
    fn test_validate_password_strength_no_lowercase() {
        let result = validate_password_strength("UPPERCASE1!");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("lowercase letter"));
    }

    #[test]
    fn test_validate_password_strength_no_digit() {
        let result = validate_password_strength("NoDigits!");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("digit"));
    }

    #[test]
    fn test_validate_password_strength_no_symbol() {
        let result = validate_password_strength("NoSymbol123");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("symbol"));
    }
}
