//! Database layer
//!
//! - `pool`: PostgreSQL connection pool management with a startup health check
//! - `migrations`: sqlx migration runner
//!
//! Models live in the `models` module at crate root level. All locking and
//! transaction semantics are delegated to PostgreSQL; this layer performs no
//! coordination of its own.

pub mod migrations;
pub mod pool;
