//! Authentication utilities
//!
//! This module provides the authentication primitives for Taskbook:
//!
//! - [`password`]: bcrypt password hashing, verification, and strength rules
//! - [`jwt`]: signed bearer token generation and validation
//! - [`middleware`]: the [`middleware::AuthContext`] identity value injected
//!   into requests by the API's auth layer, and the error taxonomy it maps
//!   to unauthorized responses
//!
//! # Example
//!
//! ```no_run
//! use taskbook_shared::auth::password::{hash_password, verify_password};
//! use taskbook_shared::auth::jwt::{create_token, validate_token, Claims};
//! use chrono::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("user_password", 10)?;
//! assert!(verify_password("user_password", &hash)?);
//!
//! let claims = Claims::new(42, "user@example.com", Duration::days(1));
//! let token = create_token(&claims, "secret-key")?;
//! let verified = validate_token(&token, "secret-key")?;
//! assert_eq!(verified.sub, 42);
//! # Ok(())
//! # }
//! ```

pub mod jwt;
pub mod middleware;
pub mod password;
