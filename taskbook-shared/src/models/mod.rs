//! Database models
//!
//! This module contains the two entities of the system and their CRUD
//! operations:
//!
//! - `user`: user accounts and authentication lookups
//! - `task`: per-user tasks with a toggleable read-state
//!
//! # Example
//!
//! ```no_run
//! use taskbook_shared::models::user::{CreateUser, User};
//! use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let user = User::create(
//!     &pool,
//!     CreateUser {
//!         first_name: "Ada".to_string(),
//!         last_name: "Lovelace".to_string(),
//!         email: "ada@example.com".to_string(),
//!         password_hash: "$2b$10$...".to_string(),
//!     },
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod task;
pub mod user;
