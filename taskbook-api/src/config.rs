//! Configuration management for the API server
//!
//! Configuration is read from the environment once at startup into a
//! [`Config`] value that is injected into the application state — nothing
//! looks environment variables up ambiently after boot.
//!
//! # Environment Variables
//!
//! - `HOST`: host to bind to (default: 0.0.0.0)
//! - `PORT`: port to bind to (default: 4000)
//! - `APP_ENV`: environment name (default: development)
//! - `DATABASE_URL`: PostgreSQL connection string (warned about when absent)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//! - `JWT_SECRET`: token signing secret (default: change_me — override in production)
//! - `JWT_EXPIRES_IN_SECONDS`: token lifetime (default: 86400, one day)
//! - `BCRYPT_COST`: password hash work factor (default: 10)

use serde::{Deserialize, Serialize};
use std::env;

/// Default signing secret; only acceptable for local development
const INSECURE_DEFAULT_SECRET: &str = "change_me";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Environment name (e.g. "development", "production")
    pub environment: String,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for token signing
    pub secret: String,

    /// Token lifetime in seconds
    pub expires_in_seconds: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// Every setting has a default; a missing `DATABASE_URL` and an
    /// unchanged `JWT_SECRET` each produce a startup warning rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable (e.g. a
    /// non-numeric `PORT`).
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()?;

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_default();
        if database_url.is_empty() {
            tracing::warn!("DATABASE_URL is not set. Please configure it in .env");
        }

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| INSECURE_DEFAULT_SECRET.to_string());
        if jwt_secret == INSECURE_DEFAULT_SECRET {
            tracing::warn!("JWT_SECRET is using the insecure default; override it in production");
        }

        let expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<i64>()?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        Ok(Self {
            api: ApiConfig { host, port },
            environment,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expires_in_seconds,
            },
            bcrypt_cost,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Token lifetime as a chrono duration
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.jwt.expires_in_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 4000,
            },
            environment: "test".to_string(),
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
                expires_in_seconds: 86400,
            },
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:4000");
    }

    #[test]
    fn test_token_ttl() {
        assert_eq!(test_config().token_ttl(), chrono::Duration::days(1));
    }
}
