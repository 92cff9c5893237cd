//! API route handlers
//!
//! Route handlers organized by resource:
//!
//! - `health`: Health check endpoint
//! - `auth`: Authentication endpoints (register, login, refresh)
//! - `tasks`: Task CRUD and read-state toggle
//! - `users`: Current-user and user-listing endpoints

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;
